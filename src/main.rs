mod config;
mod operation_arg;

use config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "jsondiff=warn");
    }
    // stdout carries the patch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    let options = config.encode_options();
    let patch = config.into_patch();
    tracing::debug!(operations = patch.len(), escape_html = options.escape_html, "patch assembled");

    let stdout = std::io::stdout();
    patch.encode_with_options(stdout.lock(), &options)?;
    Ok(())
}
