use crate::prelude::*;
use clap::Parser;

mod error;
mod mcp;
mod prelude;
mod processon;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Turn Markdown outlines into ProcessOn mind maps, as an MCP server or from the command line"
)]
pub struct App {
    /// Defaults to the MCP server on stdio when omitted
    #[command(subcommand)]
    pub command: Option<SubCommands>,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// ProcessOn API key
    #[clap(long, env = "PROCESSON_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// ProcessOn base URL [default: https://www.processon.com, or `BASE_URL` when set]
    #[clap(long, env = "PROCESSON_BASE_URL", global = true)]
    base_url: Option<String>,

    /// How the mind map document is written into the `def` field
    #[clap(
        long,
        env = "PROCESSON_DEF_ENCODING",
        global = true,
        value_enum,
        default_value = "percent"
    )]
    def_encoding: crate::processon::DefEncoding,

    /// How the create request body is sent
    #[clap(
        long,
        env = "PROCESSON_BODY_FORMAT",
        global = true,
        value_enum,
        default_value = "form"
    )]
    body_format: crate::processon::BodyFormat,

    /// Create endpoint revision
    #[clap(
        long,
        env = "PROCESSON_API_VERSION",
        global = true,
        value_enum,
        default_value = "v2"
    )]
    api_version: crate::processon::ApiVersion,

    /// Whether to display additional information.
    #[clap(long, env = "PROCESSON_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// ProcessOn mind map operations
    Mind(crate::processon::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        Some(SubCommands::Mind(sub_app)) => crate::processon::run(sub_app, app.global).await,
        Some(SubCommands::MCP(sub_app)) => crate::mcp::run(sub_app, app.global).await,
        None => crate::mcp::run_default(app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
