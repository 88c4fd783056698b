use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Starting MCP server with stdio transport...");
        eprintln!();
    }
    log::info!("serving MCP on stdio");

    let replies = serve_lines(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        &global,
    )
    .await?;

    log::info!("stdin closed after {replies} replies, shutting down");

    Ok(())
}

/// Answer newline-delimited JSON-RPC messages until `reader` hits EOF.
///
/// Each reply is one line on `writer`. Blank lines and notifications produce
/// nothing. Returns how many replies were written.
pub async fn serve_lines<R, W>(mut reader: R, mut writer: W, global: &crate::Global) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    let mut replies = 0;

    while reader.read_line(&mut line).await? > 0 {
        let message = line.trim();

        if !message.is_empty() {
            if global.verbose {
                eprintln!("Received: {message}");
            }

            if let Some(response) = super::handle_request(message, global).await {
                let mut reply = serde_json::to_string(&response)?;

                if global.verbose {
                    eprintln!("Sending: {reply}");
                }

                reply.push('\n');
                writer.write_all(reply.as_bytes()).await?;
                writer.flush().await?;
                replies += 1;
            }
        }

        line.clear();
    }

    Ok(replies)
}
