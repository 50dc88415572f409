use crate::catalog::CatalogService;
use crate::core::{Config, Result};
use crate::ledger::LedgerService;
use crate::store::TenantStore;

/// 服务器状态 - 所有处理器共享
///
/// 各服务内部只持有 `Arc<Database>`，克隆开销很小。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 租户存储
    pub store: TenantStore,
    /// 账单状态机
    pub ledger: LedgerService,
    /// 参考目录
    pub catalog: CatalogService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 打开 (或创建) 数据库文件；`:memory:` 使用内存库。
    pub fn initialize(config: &Config) -> Result<Self> {
        let store = match config.db_path() {
            Some(path) => {
                std::fs::create_dir_all(&config.work_dir)?;
                tracing::info!(path = %path.display(), "Opening ledger database");
                TenantStore::open(&path)?
            }
            None => {
                tracing::info!("Using in-memory ledger database");
                TenantStore::open_in_memory()?
            }
        };

        Ok(Self::with_store(config.clone(), store))
    }

    /// 基于已有存储构建状态
    pub fn with_store(config: Config, store: TenantStore) -> Self {
        Self {
            config,
            ledger: LedgerService::new(store.clone()),
            catalog: CatalogService::new(store.clone()),
            store,
        }
    }
}
