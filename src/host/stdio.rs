//! Stdin/stdout JSON bridge for tool calls.
//!
//! Reads newline-delimited JSON [`ToolCallEnvelope`] messages, dispatches
//! them to the built-in `host.*` commands or the [`ToolRegistry`], and writes
//! one [`ResponseEnvelope`] per request as newline-delimited JSON.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

use crate::error::{CarbonError, Result, error_codes};
use crate::host::contract::{BuiltinCommand, ResponseEnvelope, ToolCallEnvelope};
use crate::tools::ToolRegistry;

/// Run the bridge on the process's stdin/stdout until stdin closes.
pub async fn run_stdio_bridge(registry: Arc<ToolRegistry>) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = BufWriter::new(tokio::io::stdout());
    run_bridge(registry, reader, writer).await
}

/// Serve tool calls from `reader`, answering on `writer`, until EOF.
///
/// Malformed lines are answered with a `parse-error` response and the loop
/// keeps going; only read/write failures end it early.
pub async fn run_bridge<R, W>(registry: Arc<ToolRegistry>, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    let mut served = 0_u64;

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| CarbonError::Channel(format!("failed to read request: {e}")))?;

        // EOF
        if bytes_read == 0 {
            tracing::info!(served, "input closed (EOF); shutting down bridge");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ToolCallEnvelope>(trimmed) {
            Ok(envelope) => dispatch(&registry, envelope).await,
            Err(e) => {
                tracing::warn!(error = %e, raw_line = %trimmed, "failed to parse tool call envelope");
                ResponseEnvelope::error(
                    "parse-error",
                    error_codes::INVALID_INPUT,
                    format!("failed to parse tool call envelope: {e}"),
                )
            }
        };

        let json = serde_json::to_string(&response)
            .map_err(|e| CarbonError::Channel(format!("failed to serialize response: {e}")))?;
        write_line(&mut writer, &json).await?;
        served += 1;
    }

    Ok(())
}

/// Answer one envelope.
///
/// Tool execution runs on the blocking pool since profile updates may wait
/// on the profile lock file.
pub async fn dispatch(registry: &Arc<ToolRegistry>, envelope: ToolCallEnvelope) -> ResponseEnvelope {
    if let Err(e) = envelope.validate() {
        return ResponseEnvelope::error(envelope.request_id, error_codes::INVALID_INPUT, e.to_string());
    }

    let ToolCallEnvelope {
        request_id,
        tool,
        args,
        ..
    } = envelope;

    if let Some(builtin) = BuiltinCommand::parse(&tool) {
        return ResponseEnvelope::ok(request_id, builtin_payload(registry, builtin));
    }

    let args = if args.is_null() {
        serde_json::json!({})
    } else {
        args
    };

    let registry = Arc::clone(registry);
    let tool_name = tool.clone();
    let outcome = tokio::task::spawn_blocking(move || registry.call(&tool_name, args)).await;

    match outcome {
        Ok(Ok(result)) => ResponseEnvelope::ok(request_id, result.payload),
        Ok(Err(e)) => {
            tracing::debug!(%tool, code = e.code(), error = %e, "tool call rejected");
            ResponseEnvelope::from_error(request_id, &e)
        }
        Err(e) => {
            tracing::error!(%tool, error = %e, "tool task failed");
            ResponseEnvelope::error(
                request_id,
                error_codes::TOOL_FAILED,
                format!("tool {tool} did not complete: {e}"),
            )
        }
    }
}

fn builtin_payload(registry: &ToolRegistry, command: BuiltinCommand) -> serde_json::Value {
    match command {
        BuiltinCommand::HostPing => serde_json::json!({"pong": true}),
        BuiltinCommand::HostVersion => serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "contract": crate::host::contract::EVENT_VERSION,
        }),
        BuiltinCommand::HostTools => serde_json::json!({
            "mode": registry.mode(),
            "tools": registry.schemas_for_api(),
        }),
    }
}

/// Write a single JSON line and flush.
async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, json: &str) -> Result<()> {
    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|e| CarbonError::Channel(format!("failed to write response: {e}")))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| CarbonError::Channel(format!("failed to write newline: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| CarbonError::Channel(format!("failed to flush output: {e}")))?;
    Ok(())
}
