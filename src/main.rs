use benefit_claim_etl::adapters::preview::render_summary;
use benefit_claim_etl::utils::{logger, validation::Validate};
use benefit_claim_etl::{ClaimPipeline, CliConfig, EtlEngine, LocalStorage};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting benefit-claim-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let preview_rows = config.preview;
    let report_path = config.report.clone();
    let dry_run = config.dry_run;

    let storage = LocalStorage::current_dir();
    let pipeline = ClaimPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    let outcome = if dry_run {
        engine.dry_run().await
    } else {
        engine.run().await
    };

    match outcome {
        Ok(summary) => {
            println!("{}", render_summary(&summary, preview_rows));

            if let Some(path) = report_path {
                tokio::fs::write(&path, summary.report_json()?).await?;
                tracing::info!("📝 Diagnostics report written to: {}", path);
            }

            if !summary.succeeded() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Benefit claim run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
