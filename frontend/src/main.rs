//! Page bootstrap: render the Nomado home page once and print it.
//!
//! Logs go to stderr as JSON; stdout carries only the HTML body.

mod bootstrap;

use std::io::Write;

use color_eyre::eyre::{Result, WrapErr, eyre};
use frontend::FrontendSettings;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = FrontendSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let app = bootstrap::build_home_app(&settings)?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build page runtime")?;
    runtime.block_on(app.load());

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", app.to_html()).wrap_err("failed to write page")?;
    Ok(())
}
