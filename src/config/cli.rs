use crate::utils::dates::parse_issue_date;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "offer-letter")]
#[command(about = "Merge offer letter data over template defaults and check required fields")]
pub struct CliConfig {
    /// JSON file holding the caller's fields ("-" reads stdin)
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// TOML template configuration overriding the built-in defaults
    #[arg(short, long)]
    pub config: Option<String>,

    /// Issue date written into `date` (YYYY-MM-DD, DD/MM/YYYY or "today")
    #[arg(long)]
    pub issue_date: Option<String>,

    /// Only validate; print nothing on success
    #[arg(long)]
    pub check: bool,

    /// Print the template defaults and exit
    #[arg(long)]
    pub show_defaults: bool,

    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn reads_stdin(&self) -> bool {
        self.input == "-"
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        if let Some(date) = &self.issue_date {
            parse_issue_date(date)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_read_stdin() {
        let config = CliConfig::parse_from(["offer-letter"]);
        assert!(config.reads_stdin());
        assert!(config.config.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_issue_date_fails_validation() {
        let config = CliConfig::parse_from([
            "offer-letter",
            "--input",
            "letter.json",
            "--issue-date",
            "31/31/2025",
        ]);
        assert!(!config.reads_stdin());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_config_path_fails_validation() {
        let config = CliConfig::parse_from(["offer-letter", "--config", ""]);
        assert!(config.validate().is_err());
    }
}
