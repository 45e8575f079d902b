//! devkit-cli: shared plumbing for the `v3-price` and `rpc-override-proxy`
//! binaries.

pub mod proxy;

use color_eyre::eyre::{Context, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-q` selects WARN and each `-v` lowers
/// the level from INFO. Logs go to stderr so stdout only carries results.
pub fn init_tracing(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        Level::WARN
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.as_str()))
        .wrap_err("failed to initialize tracing filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
