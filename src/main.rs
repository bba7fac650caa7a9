use calc_tech::core::report::render_text;
use calc_tech::utils::logger;
use calc_tech::{CalcRecord, CliConfig, DisplayFormat};
use clap::Parser;

fn print_record(record: &CalcRecord, format: DisplayFormat) -> Result<(), serde_json::Error> {
    match format {
        DisplayFormat::Text => print!("{}", render_text(record)),
        DisplayFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
    }
    Ok(())
}

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    let calculator = config.command.name();
    tracing::debug!("Running calculator '{}'", calculator);
    if config.verbose {
        tracing::debug!("Request: {:?}", config.command);
    }

    match config.command.evaluate(config.label.clone()) {
        Ok(record) => {
            tracing::debug!("✅ {} finished", calculator);
            if let Err(e) = print_record(&record, config.format) {
                eprintln!("❌ Failed to render result: {}", e);
                std::process::exit(3);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                calculator,
                e,
                e.category(),
                e.severity()
            );

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
