//! cd-server: Contact Directory main binary
//!
//! Usage:
//!   cd-server                   - Start the web server
//!   cd-server --config <path>   - Start with an explicit TOML config file
//!   cd-server --help            - Show help

use cd_core::Config;
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Web server, optionally with an explicit config file
    Server { config_path: Option<String> },
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = parse_args(std::env::args().skip(1))?;

    let config_path = match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("cd-server {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server { config_path } => config_path,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("info".parse()?)
        )
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = match &config_path {
        Some(path) => Config::from_toml_file(path),
        None => Config::load(),
    }
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting cd-server...");
    tracing::info!(
        "Page size: {}, demo contacts: {}",
        config.directory.page_size,
        config.directory.seed_demo
    );

    run_server(config).await
}

/// Parse command line arguments
fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<RunMode> {
    let mut config_path = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(RunMode::Help),
            "--version" | "-v" => return Ok(RunMode::Version),
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?;
                config_path = Some(path);
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    Ok(RunMode::Server { config_path })
}

/// Print help message
fn print_help() {
    println!("cd-server - Contact Directory");
    println!();
    println!("Usage:");
    println!("  cd-server                   Start the web server");
    println!("  cd-server --config <path>   Use the given TOML config file");
    println!("  cd-server --help            Show this help message");
    println!("  cd-server --version         Show version");
    println!();
    println!("Environment Variables:");
    println!("  CONTACTS_HOST         Bind host (default: 127.0.0.1)");
    println!("  CONTACTS_PORT         Bind port (default: 3000)");
    println!("  CONTACTS_STATIC_DIR   Static files directory (default: ./ui/static)");
    println!("  CONTACTS_PAGE_SIZE    Contacts per page (default: 10)");
    println!("  CONTACTS_SEED_DEMO    Preload demo contacts (default: true)");
    println!("  RUST_LOG              Log filter (default: info)");
}

/// Run the web server until Ctrl+C
async fn run_server(config: Config) -> anyhow::Result<()> {
    let mut handle = tokio::spawn(async move {
        if let Err(e) = cd_web::start_server(config).await {
            tracing::error!("Web server error: {}", e);
        }
    });

    tracing::info!("Press Ctrl+C to exit");

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutting down...");
        }
        joined = &mut handle => {
            joined?;
            anyhow::bail!("Web server stopped unexpectedly");
        }
    }

    handle.abort();
    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_default() {
        assert_eq!(
            parse_args(args(&[])).unwrap(),
            RunMode::Server { config_path: None }
        );
    }

    #[test]
    fn test_parse_args_flags() {
        assert_eq!(parse_args(args(&["--help"])).unwrap(), RunMode::Help);
        assert_eq!(parse_args(args(&["-v"])).unwrap(), RunMode::Version);
        assert_eq!(
            parse_args(args(&["--config", "contacts.toml"])).unwrap(),
            RunMode::Server {
                config_path: Some("contacts.toml".to_string())
            }
        );
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&["--config"])).is_err());
        assert!(parse_args(args(&["--cli"])).is_err());
    }
}
