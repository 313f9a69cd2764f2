//! relaymsgd configuration test.
//!
//! `relaymsgd [config.toml]` loads the configuration, runs the relaymsg
//! block through its test phase, applies it, and reports every diagnostic.
//! Exits non-zero when any error was found.

use relaymsg_proto::RELAYMSG_CAP;
use relaymsgd::config::{self, Config};
use relaymsgd::metrics;
use relaymsgd::state::Matrix;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Configuration validation error");
        }
        anyhow::bail!("{} configuration error(s) in [server]", errors.len());
    }

    metrics::init();

    info!(
        file = %config.file(),
        server = %config.server.name,
        network = %config.server.network,
        sid = %config.server.sid,
        "Testing relaymsg configuration"
    );

    let (matrix, report) = Matrix::new(&config);

    if !report.is_ok() {
        anyhow::bail!("{} error(s) in [relaymsg]", report.error_count());
    }

    let policy = matrix.policy.snapshot();
    info!(
        hostmask = %policy.display_hostmask,
        require_separator = policy.require_separator,
        "relaymsg configuration OK"
    );
    println!("CAP LS 302: {}", RELAYMSG_CAP.ls_token(302));

    Ok(())
}
