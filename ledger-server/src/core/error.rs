use thiserror::Error;

use crate::store::StorageError;

/// 服务器启动与运行错误
///
/// 请求级错误走 [`AppError`](shared::error::AppError)；这里只覆盖进程级失败。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 服务器 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
