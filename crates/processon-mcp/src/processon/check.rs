use super::ProcessOnConfig;
use crate::prelude::{println, *};
use serde::Serialize;

#[derive(Debug, clap::Args, Clone)]
pub struct CheckOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckOutput {
    pub base_url: String,
    pub api_key: String,
}

impl CheckOutput {
    /// `{baseUrl}:{apiKey}`, the text returned by the `check` tool
    pub fn to_text(&self) -> String {
        f!("{}:{}", self.base_url, self.api_key)
    }
}

/// Public data function - used by both CLI and MCP
pub fn check_data(config: &ProcessOnConfig) -> Result<CheckOutput, Error> {
    let api_key = config.raw_api_key()?;

    Ok(CheckOutput {
        base_url: config.base_url.clone(),
        api_key: api_key.to_string(),
    })
}

pub fn run(options: CheckOptions, config: &ProcessOnConfig) -> Result<()> {
    let data = check_data(config)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["Base URL", data.base_url]);
    table.add_row(prettytable::row!["API key", data.api_key]);
    table.printstd();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processon::test_support;

    #[test]
    fn test_check_data_text() {
        let config = test_support::config("https://www.processon.com", Some("abc"));
        let data = check_data(&config).unwrap();
        assert_eq!(data.to_text(), "https://www.processon.com:abc");
    }

    #[test]
    fn test_check_data_returns_key_as_configured() {
        let config = test_support::config("https://www.processon.com", Some(" abc "));
        let data = check_data(&config).unwrap();
        assert_eq!(data.to_text(), "https://www.processon.com: abc ");
    }

    #[test]
    fn test_check_data_requires_key() {
        let config = test_support::config("https://www.processon.com", None);
        assert!(matches!(check_data(&config), Err(Error::Config(_))));
    }
}
