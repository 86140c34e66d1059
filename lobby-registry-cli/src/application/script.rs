use crate::application::rpc::{RpcError, RpcRouter};
use crate::infrastructure::Result;
use lobby_registry_core::{Caller, ErrorKind, UserId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// One scripted request: who is calling, which RPC and its payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScriptLine {
    pub user_id: UserId,
    pub username: String,
    pub rpc: String,
    #[serde(default)]
    pub payload: Value,
}

impl ScriptLine {
    pub fn caller(&self) -> Caller {
        Caller::new(self.user_id.clone(), self.username.clone())
    }

    /// Parse one input line; blank lines and `#` comments yield `None`
    pub fn parse(line: &str) -> Option<std::result::Result<Self, serde_json::Error>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some(serde_json::from_str(line))
    }
}

/// Counters for one script run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptStats {
    pub requests: usize,
    pub failures: usize,
}

/// Feed every request in `reader` through `router`, writing one JSON
/// response per line to `writer`.
///
/// A line that does not parse is answered with an `invalid_argument` error
/// and the run continues.
pub async fn run_script<R, W>(router: &RpcRouter, reader: R, mut writer: W) -> Result<ScriptStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = ScriptStats::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;

        let Some(parsed) = ScriptLine::parse(&line) else {
            continue;
        };
        stats.requests += 1;

        let response = match parsed {
            Ok(request) => {
                debug!(
                    line = line_no,
                    rpc = %request.rpc,
                    user_id = %request.user_id,
                    "Dispatching"
                );
                router.handle(&request.caller(), &request.rpc, request.payload)
            }
            Err(e) => {
                warn!(line = line_no, error = %e, "Malformed script line");
                RpcError::new(
                    ErrorKind::InvalidArgument,
                    format!("Malformed request on line {}: {}", line_no, e),
                )
                .to_envelope()
            }
        };

        if response.get("error").is_some() {
            stats.failures += 1;
        }

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
    }

    writer.flush().await?;
    Ok(stats)
}
