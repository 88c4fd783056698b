#[derive(Debug, clap::Parser)]
#[command(name = "mcp")]
#[command(about = "Model Context Protocol server")]
pub struct App {
    /// Transport to serve on (stdio when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Start MCP server with stdio transport
    #[clap(name = "stdio")]
    Stdio,

    /// Start MCP server with HTTP transport
    #[clap(name = "rest")]
    Rest(RestOptions),
}

#[derive(Debug, Clone, clap::Args)]
pub struct RestOptions {
    /// Port to listen on
    #[arg(short, long, env = "PROCESSON_MCP_PORT", default_value = "9593")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "PROCESSON_MCP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Path that accepts JSON-RPC requests
    #[arg(long, env = "PROCESSON_MCP_ENDPOINT", default_value = "/rest")]
    pub endpoint: String,
}

impl RestOptions {
    /// Endpoint path with exactly one leading slash
    pub fn endpoint_path(&self) -> String {
        format!("/{}", self.endpoint.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(endpoint: &str) -> RestOptions {
        RestOptions {
            port: 9593,
            host: "127.0.0.1".to_string(),
            endpoint: endpoint.to_string(),
        }
    }

    #[test]
    fn test_endpoint_path_adds_slash() {
        assert_eq!(options("rest").endpoint_path(), "/rest");
        assert_eq!(options("/rest").endpoint_path(), "/rest");
        assert_eq!(options("//mcp/v1").endpoint_path(), "/mcp/v1");
    }
}
