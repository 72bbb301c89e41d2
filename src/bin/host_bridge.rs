//! Headless host bridge binary for stdin/stdout JSON communication.
//!
//! Reads `ToolCallEnvelope` messages as newline-delimited JSON from stdin
//! and writes one `ResponseEnvelope` per request to stdout.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel.

use std::path::PathBuf;
use std::sync::Arc;

use carbonshift::host::stdio::run_stdio_bridge;
use carbonshift::{CarbonConfig, build_registry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("carbonshift=info")),
        )
        .init();

    tracing::info!("carbonshift-host starting");

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = CarbonConfig::load_or_default(config_path.as_deref())?;
    let service = config.build_service();
    let registry = Arc::new(build_registry(&service, config.tools.mode));

    run_stdio_bridge(registry).await.map_err(|e| {
        tracing::error!(error = %e, code = e.code(), "carbonshift-host exited with error");
        anyhow::anyhow!("carbonshift-host failed: {e}")
    })?;

    tracing::info!("carbonshift-host shut down cleanly");
    Ok(())
}
