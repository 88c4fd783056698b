use crate::prelude::{println, *};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncReadExt;

pub mod check;
pub mod create;
pub mod encode;

// Re-export public data functions
pub use check::check_data;
pub use create::create_mind_data;

/// Per-request timeout for the create endpoint.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, clap::Parser)]
#[command(name = "mind")]
#[command(about = "ProcessOn mind map operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Create a mind map from a Markdown outline and print its link
    #[clap(name = "create")]
    Create(create::CreateOptions),

    /// Print the document that would be submitted, without calling ProcessOn
    #[clap(name = "encode")]
    Encode(encode::EncodeOptions),

    /// Show the configured base URL and API key
    #[clap(name = "check")]
    Check(check::CheckOptions),
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefEncoding {
    /// Pretty-printed JSON
    Json,
    /// Percent-encoded JSON
    Percent,
}

impl From<DefEncoding> for processon_core::document::DefEncoding {
    fn from(e: DefEncoding) -> Self {
        match e {
            DefEncoding::Json => processon_core::document::DefEncoding::Json,
            DefEncoding::Percent => processon_core::document::DefEncoding::Percent,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    /// JSON request body
    Json,
    /// application/x-www-form-urlencoded request body
    Form,
}

impl From<BodyFormat> for processon_core::request::BodyFormat {
    fn from(b: BodyFormat) -> Self {
        match b {
            BodyFormat::Json => processon_core::request::BodyFormat::Json,
            BodyFormat::Form => processon_core::request::BodyFormat::Form,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// /api/activity/mcp/chart/create/mind
    V1,
    /// /api/activity/mcp/chart/v2/create/mind
    V2,
}

impl From<ApiVersion> for processon_core::request::ApiVersion {
    fn from(v: ApiVersion) -> Self {
        match v {
            ApiVersion::V1 => processon_core::request::ApiVersion::V1,
            ApiVersion::V2 => processon_core::request::ApiVersion::V2,
        }
    }
}

/// ProcessOn configuration, resolved once from flags and environment variables
#[derive(Debug, Clone)]
pub struct ProcessOnConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub def_encoding: processon_core::document::DefEncoding,
    pub body_format: processon_core::request::BodyFormat,
    pub api_version: processon_core::request::ApiVersion,
}

impl ProcessOnConfig {
    pub fn from_global(global: &crate::Global) -> Self {
        let legacy = std::env::var(LEGACY_BASE_URL_ENV).ok();
        Self {
            base_url: resolve_base_url(global.base_url.as_deref(), legacy.as_deref()),
            api_key: global.api_key.clone(),
            def_encoding: global.def_encoding.into(),
            body_format: global.body_format.into(),
            api_version: global.api_version.into(),
        }
    }

    /// The API key as configured, untouched. Blank counts as missing.
    pub fn raw_api_key(&self) -> Result<&str, Error> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Config("PROCESSON_API_KEY environment variable not set".to_string())
            })
    }

    /// The API key sent in the request header
    pub fn api_key(&self) -> Result<&str, Error> {
        self.raw_api_key().map(str::trim)
    }

    pub fn create_url(&self) -> String {
        processon_core::request::create_mind_url(&self.base_url, self.api_version)
    }
}

/// Unprefixed variable older MCP client configs set for the base URL.
const LEGACY_BASE_URL_ENV: &str = "BASE_URL";

/// `--base-url`/`PROCESSON_BASE_URL` wins, then `BASE_URL`, then the public site.
fn resolve_base_url(configured: Option<&str>, legacy: Option<&str>) -> String {
    let base_url = [configured, legacy]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(processon_core::request::DEFAULT_BASE_URL);

    processon_core::request::normalize_base_url(base_url).to_string()
}

/// Create an HTTP client that sends the API key with every request
pub fn create_client(api_key: &str) -> Result<reqwest::Client, Error> {
    use reqwest::header::{HeaderMap, HeaderValue};

    let mut headers = HeaderMap::new();
    headers.insert(
        processon_core::request::API_KEY_HEADER,
        HeaderValue::from_str(api_key)
            .map_err(|e| Error::Config(format!("Invalid API key header value: {e}")))?,
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {e}")))
}

/// Read Markdown from a file, or from stdin when no file (or `-`) is given
pub async fn read_markdown(path: Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => tokio::fs::read_to_string(&path)
            .await
            .wrap_err_with(|| f!("Failed to read {}", path.display())),
        _ => {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .wrap_err("Failed to read Markdown from stdin")?;
            Ok(content)
        }
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = ProcessOnConfig::from_global(&global);

    if global.verbose {
        println!("ProcessOn base URL: {}", config.base_url);
        println!();
    }

    match app.command {
        Commands::Create(options) => create::run(options, &config).await,
        Commands::Encode(options) => encode::run(options, &config).await,
        Commands::Check(options) => check::run(options, &config),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ProcessOnConfig;
    use processon_core::document::DefEncoding;
    use processon_core::request::{ApiVersion, BodyFormat};

    pub fn config(base_url: &str, api_key: Option<&str>) -> ProcessOnConfig {
        ProcessOnConfig {
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
            def_encoding: DefEncoding::Percent,
            body_format: BodyFormat::Form,
            api_version: ApiVersion::V2,
        }
    }

    pub fn global(base_url: &str, api_key: Option<&str>) -> crate::Global {
        crate::Global {
            api_key: api_key.map(str::to_string),
            base_url: Some(base_url.to_string()),
            def_encoding: super::DefEncoding::Percent,
            body_format: super::BodyFormat::Form,
            api_version: super::ApiVersion::V2,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_required() {
        let config = test_support::config("https://www.processon.com", None);
        assert!(matches!(config.api_key(), Err(Error::Config(_))));

        let config = test_support::config("https://www.processon.com", Some("   "));
        assert!(matches!(config.api_key(), Err(Error::Config(_))));

        let config = test_support::config("https://www.processon.com", Some("secret"));
        assert_eq!(config.api_key().unwrap(), "secret");
    }

    #[test]
    fn test_raw_api_key_is_kept_verbatim() {
        let config = test_support::config("https://www.processon.com", Some("  secret \n"));
        assert_eq!(config.raw_api_key().unwrap(), "  secret \n");
        assert_eq!(config.api_key().unwrap(), "secret");
    }

    #[test]
    fn test_resolve_base_url_precedence() {
        assert_eq!(
            resolve_base_url(Some("http://flag:1/"), Some("http://legacy:2")),
            "http://flag:1"
        );
        assert_eq!(resolve_base_url(None, Some("http://legacy:2/")), "http://legacy:2");
        assert_eq!(resolve_base_url(Some("  "), Some("http://legacy:2")), "http://legacy:2");
        assert_eq!(
            resolve_base_url(None, None),
            processon_core::request::DEFAULT_BASE_URL
        );
        assert_eq!(
            resolve_base_url(None, Some("")),
            processon_core::request::DEFAULT_BASE_URL
        );
    }

    #[test]
    fn test_from_global_normalizes_base_url() {
        let global = test_support::global("http://localhost:9000/", Some("k"));
        let config = ProcessOnConfig::from_global(&global);
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(
            config.create_url(),
            "http://localhost:9000/api/activity/mcp/chart/v2/create/mind"
        );
    }

    #[test]
    fn test_value_enums_map_to_core() {
        assert_eq!(
            processon_core::document::DefEncoding::from(DefEncoding::Json),
            processon_core::document::DefEncoding::Json
        );
        assert_eq!(
            processon_core::request::BodyFormat::from(BodyFormat::Json),
            processon_core::request::BodyFormat::Json
        );
        assert_eq!(
            processon_core::request::ApiVersion::from(ApiVersion::V1),
            processon_core::request::ApiVersion::V1
        );
    }

    #[test]
    fn test_create_client_rejects_invalid_header() {
        assert!(matches!(create_client("bad\nkey"), Err(Error::Config(_))));
        assert!(create_client("good-key").is_ok());
    }
}
