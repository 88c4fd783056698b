//! Create ProcessOn mind maps

use colored::Colorize;
use processon_core::document::encode;
use processon_core::outline::UuidIds;
use processon_core::request::{BodyFormat, CreateMindRequest};
use processon_core::response::{interpret_response, CreateMindResponse, CreateOutcome};
use std::path::PathBuf;

use super::{create_client, read_markdown, ProcessOnConfig};
use crate::prelude::{eprintln, println, *};

/// Create a mind map from a Markdown outline
#[derive(Debug, clap::Args, Clone)]
pub struct CreateOptions {
    /// File name of the new mind map
    #[arg(long)]
    pub title: String,

    /// Markdown file to read (reads stdin when omitted or `-`)
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Create mind map data - handles all I/O with the ProcessOn endpoint
///
/// This is the imperative shell that handles:
/// - Validating the title and content
/// - Encoding the Markdown into a document
/// - Sending the create request and reading the response
///
/// A rejection by ProcessOn is an `Ok(CreateOutcome::Rejected)`, not an error.
pub async fn create_mind_data(
    config: &ProcessOnConfig,
    title: String,
    content: String,
) -> Result<CreateOutcome, Error> {
    let api_key = config.api_key()?;

    if title.trim().is_empty() {
        return Err(Error::Input("File name must not be empty".to_string()));
    }
    if content.trim().is_empty() {
        return Err(Error::Input("Markdown content must not be empty".to_string()));
    }

    let def = encode(&content, config.def_encoding, &mut UuidIds)?;
    let request = CreateMindRequest::new(title, def);

    let client = create_client(api_key)?;
    let url = config.create_url();

    log::debug!(
        "POST {url} as {:?} (def encoding {:?}, {} bytes)",
        config.body_format,
        config.def_encoding,
        request.def.len()
    );

    let builder = client.post(&url);
    let builder = match config.body_format {
        BodyFormat::Json => builder.json(&request),
        BodyFormat::Form => builder.form(&request),
    };

    let response = builder
        .send()
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::Transport(f!("Failed to read response: {e}")))?;

    if !status.is_success() {
        log::warn!("ProcessOn answered HTTP {status}");
        let detail = if body.trim().is_empty() {
            f!("HTTP {status}")
        } else {
            body
        };
        return Err(Error::Transport(detail));
    }

    let parsed: CreateMindResponse = serde_json::from_str(&body)
        .map_err(|e| Error::Protocol(f!("Failed to parse response: {e}")))?;

    log::debug!("ProcessOn answered code {:?}", parsed.code);

    Ok(interpret_response(parsed, &config.base_url)?)
}

pub async fn run(options: CreateOptions, config: &ProcessOnConfig) -> Result<()> {
    let content = read_markdown(options.file.clone()).await?;
    let outcome = create_mind_data(config, options.title.clone(), content).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match &outcome {
        CreateOutcome::Created { file_url, .. } => {
            println!("{} {}", "Mind map created:".green().bold(), file_url);
            Ok(())
        }
        CreateOutcome::Rejected { .. } => {
            eprintln!("{}", outcome.to_text().red());
            Err(eyre!("ProcessOn rejected the mind map"))
        }
    }
}
