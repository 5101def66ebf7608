//! CLI entrypoint for `cargo-accessors`.

use cargo_accessors::{AccessorsError, Args, Settings, run};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "cargo_accessors=info";

fn main() -> Result<(), AccessorsError> {
    init_logging();
    let args = Args::parse_cargo();
    let settings = Settings::load(&args)?;
    run(&settings)?;
    Ok(())
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
