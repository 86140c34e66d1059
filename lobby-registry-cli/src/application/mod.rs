pub mod logging_emitter;
pub mod rpc;
pub mod schema;
pub mod script;

pub use logging_emitter::LoggingEmitter;
pub use rpc::{Rpc, RpcError, RpcRouter};
pub use schema::{schemas, write_schemas};
pub use script::{run_script, ScriptLine, ScriptStats};
