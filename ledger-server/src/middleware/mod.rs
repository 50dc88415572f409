//! HTTP middleware

mod deadline;
mod logging;

pub use deadline::{current_deadline, deadline_middleware};
pub use logging::logging_middleware;
