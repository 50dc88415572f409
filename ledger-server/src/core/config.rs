use std::path::PathBuf;
use std::str::FromStr;

/// Database file name that selects the in-memory backend
pub const IN_MEMORY_DB: &str = ":memory:";

/// 账单服务配置
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 数据库文件所在目录 |
/// | LEDGER_DB_FILE | ledger.redb | 数据库文件名，`:memory:` 为内存库 |
/// | HTTP_PORT | 3000 | 监听端口 |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | 默认日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | (未设置) | 滚动日志目录 |
/// | REQUEST_TIMEOUT_MS | 30000 | 单请求超时，超时返回 408 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭等待时间 |
///
/// 无法解析的数值回落到默认值。
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub db_file: String,
    pub http_port: u16,
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub request_timeout_ms: u64,
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// 读取环境变量 (调用前先加载 `.env`)
    pub fn from_env() -> Self {
        Self {
            work_dir: env_or("WORK_DIR", "./data".to_string()),
            db_file: env_or("LEDGER_DB_FILE", "ledger.redb".to_string()),
            http_port: env_or("HTTP_PORT", 3000),
            environment: env_or("ENVIRONMENT", "development".to_string()),
            log_level: env_or("LOG_LEVEL", "info".to_string()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30_000),
            shutdown_timeout_ms: env_or("SHUTDOWN_TIMEOUT_MS", 10_000),
        }
    }

    /// 环境配置 + 内存库，测试用
    pub fn in_memory() -> Self {
        Self {
            db_file: IN_MEMORY_DB.into(),
            ..Self::from_env()
        }
    }

    /// 数据库文件路径；内存库为 `None`
    pub fn db_path(&self) -> Option<PathBuf> {
        (self.db_file != IN_MEMORY_DB).then(|| PathBuf::from(&self.work_dir).join(&self.db_file))
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path() {
        let mut config = Config::in_memory();
        assert_eq!(config.db_path(), None);

        config.work_dir = "/tmp/ledger".into();
        config.db_file = "ledger.redb".into();
        assert_eq!(
            config.db_path(),
            Some(PathBuf::from("/tmp/ledger/ledger.redb"))
        );
    }

    #[test]
    fn test_is_production() {
        let mut config = Config::in_memory();
        config.environment = "Production".into();
        assert!(config.is_production());
        config.environment = "staging".into();
        assert!(!config.is_production());
    }
}
