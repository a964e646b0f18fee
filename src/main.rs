use anyhow::Context;
use clap::Parser;
use transtrack::core::EventLog;
use transtrack::utils::{logger, validation::Validate};
use transtrack::{app, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.json_logs);

    tracing::info!("Starting transtrack");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.resolve().and_then(|s| s.file.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    println!("=== {} Warehouse Processor ===", settings.profile);

    let driver = app::build_driver(&settings)
        .await
        .context("failed to set up the processing pipeline")?;
    driver
        .engine()
        .log()
        .info(&format!("{}Processor started", settings.profile));

    match driver.run().await {
        Ok(summary) => {
            driver
                .engine()
                .log()
                .info(&format!("{}Processor completed successfully", settings.profile));
            println!(
                "Done: {} archived, {} rejected, {} faulted, {} left in incoming",
                summary.archived, summary.rejected, summary.faulted, summary.pending
            );
            if summary.total() == 0 {
                println!(
                    "No {} files found in incoming folder",
                    settings.profile.extension().to_uppercase()
                );
            }
        }
        Err(e) => {
            driver
                .engine()
                .log()
                .error(&format!("{}Processor failed: {}", settings.profile, e));
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
