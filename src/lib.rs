pub mod classifier;
pub mod config;
pub mod error;
pub mod expr;
pub mod handlers;
pub mod io_struct;
pub mod logging;
pub mod provider;
pub mod server;
pub mod task_state;
pub mod test_utils;
