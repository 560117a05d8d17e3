use anyhow::Context;
use clap::Parser;
use offer_letter_data::utils::{logger, validation::Validate};
use offer_letter_data::{
    parse_partial, CliConfig, OfferLetterError, OfferLetterRecord, OfferLetterTemplate,
    PartialOfferLetter, TemplateConfig,
};
use std::io::Read;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 驗證命令列參數
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    // 載入範本配置 (日誌尚未初始化)
    let template_config = match &config.config {
        Some(path) => match TemplateConfig::from_file(path) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("❌ Failed to load template config '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(e.exit_code());
            }
        },
        None => None,
    };

    // 初始化日誌
    let json_logs = config.json_logs || template_config.as_ref().is_some_and(|c| c.json_logs());
    if json_logs {
        let level = if config.verbose {
            Some("debug")
        } else {
            template_config.as_ref().and_then(|c| c.log_level())
        };
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting offer-letter");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let template = match template_config {
        Some(template_config) => {
            if let Err(e) = template_config.validate() {
                report_and_exit(&e);
            }
            tracing::info!("📁 Using template '{}'", template_config.template.name);
            template_config.into_template()
        }
        None => OfferLetterTemplate::builtin(),
    };

    if config.show_defaults {
        print_record(template.defaults(), config.compact)?;
        return Ok(());
    }

    let partial = match read_partial(&config) {
        Ok(partial) => partial,
        Err(e) => report_and_exit(&e),
    };

    match template.prepare(&partial) {
        Ok(record) => {
            if config.check {
                tracing::info!("✅ All required fields present");
            } else {
                print_record(&record, config.compact)?;
            }
        }
        Err(e) => report_and_exit(&e),
    }

    Ok(())
}

fn read_partial(config: &CliConfig) -> offer_letter_data::Result<PartialOfferLetter> {
    let raw = if config.reads_stdin() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(&config.input)?
    };

    parse_partial(&raw, config.issue_date.as_deref())
}

fn print_record(record: &OfferLetterRecord, compact: bool) -> anyhow::Result<()> {
    let output = record
        .to_json_string(compact)
        .context("failed to serialize offer letter record")?;
    println!("{}", output);
    Ok(())
}

fn report_and_exit(e: &OfferLetterError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}
