//! Shared types for the tab ledger
//!
//! Wire models, the unified error system and small utilities used by the
//! ledger server and its clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
