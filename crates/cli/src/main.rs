use anyhow::Context;
use clap::{Parser, Subcommand};

use catalog_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Library catalog service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until interrupted
    Serve {
        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
        /// Load the sample catalog on startup
        #[arg(long)]
        seed: bool,
    },
    /// Print the merged OpenAPI document and exit
    Openapi {
        /// Emit single-line JSON instead of pretty output
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load catalog settings")?;
    catalog_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve { port, seed } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            settings.store.seed_sample_data |= seed;

            tracing::info!(env = ?settings.environment, "catalog CLI serving");
            catalog_app::run(settings).await
        }
        Command::Openapi { compact } => {
            let registry = catalog_app::build_registry(Default::default());
            let document =
                catalog_http::router::openapi_document(&registry, &settings.server.api_prefix);

            let rendered = if compact {
                serde_json::to_string(&document)
            } else {
                serde_json::to_string_pretty(&document)
            }
            .context("failed to render OpenAPI document")?;

            println!("{rendered}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["catalog", "serve", "--port", "9090", "--seed"]).unwrap();
        match cli.command {
            Command::Serve { port, seed } => {
                assert_eq!(port, Some(9090));
                assert!(seed);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(Cli::try_parse_from(["catalog", "serve", "--port", "70000"]).is_err());
    }

    #[test]
    fn requires_a_subcommand() {
        assert!(Cli::try_parse_from(["catalog"]).is_err());
    }
}
