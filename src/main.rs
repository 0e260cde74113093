use anyhow::Context;
use clap::Parser;
use hotel_store::core::ConfigProvider;
use hotel_store::utils::error::ErrorSeverity;
use hotel_store::utils::{logger, validation::Validate};
use hotel_store::{CliConfig, ReservationService, TracingSink};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = cli.resolve().context("failed to load configuration")?;

    if config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    tracing::debug!("Using data directory {}", config.data_dir().display());
    let service = ReservationService::from_config(&config, Arc::new(TracingSink));

    match cli.command.execute(&service) {
        Ok(output) => {
            let rendered =
                serde_json::to_string_pretty(&output).context("failed to render output")?;
            println!("{}", rendered);
        }
        Err(e) => {
            tracing::error!(
                "❌ Operation rejected: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
