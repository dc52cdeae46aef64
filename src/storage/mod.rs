// storage/mod.rs
// Database operations module

pub mod config_store;
pub mod insert;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod test_helpers;
pub mod visitor;

// Re-export commonly used items
pub use config_store::load_active_integrations;
pub use insert::call::record_call;
pub use insert::execution::{
    create_execution_log, finalize_execution_log, query_execution_history,
};
pub use migrations::run_migrations;
pub use models::{ExecutionStats, ExecutionSummary, NewCallLog, NewExecutionLog};
pub use pool::init_db_pool;
pub use visitor::get_visitor_profile;
