use anyhow::Context;
use calc_tech::utils::{logger, validation::Validate};
use calc_tech::{BatchConfig, CalcEngine, LocalStorage};
use clap::Parser;

#[derive(Parser)]
#[command(name = "batch_calc")]
#[command(about = "Evaluate a TOML file of calculator requests")]
struct Args {
    /// Path to TOML batch file
    #[arg(short, long, default_value = "batch.toml")]
    config: String,

    /// Override the output directory from the batch file
    #[arg(short, long)]
    output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - list the requests without evaluating them
    #[arg(long)]
    dry_run: bool,
}

fn load_config(path: &str) -> anyhow::Result<BatchConfig> {
    BatchConfig::from_file(path).with_context(|| format!("Failed to load batch file '{}'", path))
}

fn main() {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(2);
        }
    };

    // 初始化日誌
    if config.json_logging() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting batch '{}'", config.batch.name);
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(output) = &args.output {
        config.output.path = output.clone();
        tracing::info!("🔧 Output path overridden to: {}", output);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No calculations will be run");
        perform_dry_run(&config);
        return;
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = CalcEngine::new(storage, config.engine_options());

    match engine.run(&config.requests) {
        Ok(summary) => {
            tracing::info!("✅ Batch completed successfully!");
            println!(
                "✅ Batch completed: {} succeeded, {} failed",
                summary.record_count, summary.failure_count
            );
            for file in &summary.files {
                println!("📁 {}/{}", config.output_path(), file);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

fn display_config_summary(config: &BatchConfig, args: &Args) {
    println!("📋 Batch Summary:");
    match &config.batch.version {
        Some(version) => println!("  Batch: {} v{}", config.batch.name, version),
        None => println!("  Batch: {}", config.batch.name),
    }
    if let Some(description) = &config.batch.description {
        println!("  Description: {}", description);
    }
    println!("  Requests: {}", config.requests.len());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output.formats.join(", "));
    println!(
        "  On error: {}",
        if config.fail_fast() { "fail" } else { "skip" }
    );

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &BatchConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("🧮 Requests:");
    for (index, request) in config.requests.iter().enumerate() {
        println!(
            "  {:>3}. {} [{}]",
            index + 1,
            request.display_label(),
            request.request.name()
        );
    }

    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.output_path());
    println!("  Formats: {}", config.output.formats.join(", "));
    if let Some(archive) = config.archive_filename() {
        println!("  Compression: {} (ZIP)", archive);
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
