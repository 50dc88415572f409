//! Ledger Server - 多租户餐厅账单服务
//!
//! # 架构概述
//!
//! - **租户** (`tenant`): `X-Tenant-ID` 解析与提取器
//! - **存储** (`store`): 嵌入式 redb，按租户分区的行存储
//! - **目录** (`catalog`): 分类、商品、门店、区域、员工、桌台的通用 CRUD
//! - **账单** (`ledger`): 账单 → 订单 → 订单项 → 付款 状态机与金额重算
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! ledger-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── tenant/        # 租户标识与提取器
//! ├── store/         # redb 存储层
//! ├── catalog/       # 参考目录
//! ├── ledger/        # 账单状态机与金额计算
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod ledger;
pub mod middleware;
pub mod store;
pub mod tenant;
pub mod utils;

// Re-export 公共类型
pub use catalog::{CatalogKind, CatalogService};
pub use core::{Config, Server, ServerState};
pub use ledger::{LedgerError, LedgerService};
pub use store::TenantStore;
pub use tenant::TenantId;
pub use utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
