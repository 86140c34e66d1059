pub mod application;
pub mod infrastructure;

pub use application::{LoggingEmitter, RpcError, RpcRouter};
pub use infrastructure::{CliError, LogConfig, Result};
