use benefit_claim_etl::adapters::preview::render_summary;
use benefit_claim_etl::core::ConfigProvider;
use benefit_claim_etl::utils::{logger, validation::Validate};
use benefit_claim_etl::{ClaimPipeline, EtlEngine, LocalStorage, TomlConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Benefit claim transform driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "benefit-claim.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the input file from config
    #[arg(long)]
    input: Option<String>,

    /// Dry run - process and report without writing the workbook
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger_with_format(config.log_format(), args.verbose || config.verbose());

    tracing::info!("🚀 Starting TOML-based benefit claim transform");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(input) = args.input {
        tracing::info!("🔧 Input overridden to: {}", input);
        config.input.path = input;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, args.dry_run);

    let preview_rows = config.preview_rows();
    let report_path = config.report_path().map(str::to_string);

    let storage = LocalStorage::current_dir();
    let pipeline = ClaimPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    let outcome = if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the workbook will not be written");
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

fn display_config_summary(config: &TomlConfig, dry_run: bool) {
    println!("📋 Configuration Summary:");
    match &config.pipeline.version {
        Some(version) => println!("  Pipeline: {} v{}", config.pipeline.name, version),
        None => println!("  Pipeline: {}", config.pipeline.name),
    }
    if let Some(description) = &config.pipeline.description {
        println!("  Description: {}", description);
    }
    println!("  Input: {}", config.input_path());
    println!(
        "  Output: {}/{}",
        config.output_path().trim_end_matches('/'),
        config.output_file_name()
    );
    println!("  Date format: {}", config.datetime_format());
    println!("  Preview rows: {}", config.preview_rows());

    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
