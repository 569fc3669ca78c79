//! Adapter server runner (default binary).
//!
//! Reads `WAGARA_ADAPTER_*` from the environment and serves sessions until
//! killed. Logging is controlled by `RUST_LOG`.

use anyhow::Result;
use log::info;
use tokio::runtime::Runtime;

use wagara_blast::adapter::server::{is_disabled, run_server, ServerConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if is_disabled() {
        info!("adapter disabled via WAGARA_ADAPTER_DISABLED, nothing to do");
        return Ok(());
    }

    let config = ServerConfig::from_env();
    info!(
        "starting wagara-blast {} on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.host,
        config.port
    );

    let rt = Runtime::new()?;
    rt.block_on(run_server(config, None))
}
