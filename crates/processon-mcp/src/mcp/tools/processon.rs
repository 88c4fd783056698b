use crate::prelude::{eprintln, *};
use crate::processon::ProcessOnConfig;
use serde::Deserialize;

use super::{text_result, tool_error, JsonRpcError};

pub async fn handle_check(
    _arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let config = ProcessOnConfig::from_global(global);
    let data = crate::processon::check_data(&config).map_err(tool_error)?;

    text_result(data.to_text())
}

pub async fn handle_create_mind(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct CreateMindArgs {
        title: String,
        content: String,
    }

    let config = ProcessOnConfig::from_global(global);

    // Every tool needs the key; report it before complaining about arguments.
    config.api_key().map_err(tool_error)?;

    let args: CreateMindArgs =
        serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null)).map_err(|e| {
            JsonRpcError {
                code: -32602,
                message: format!("Invalid arguments: {e}"),
                data: None,
            }
        })?;

    if global.verbose {
        eprintln!(
            "Calling createProcessOnMind: title={}, content={} bytes",
            args.title,
            args.content.len()
        );
    }

    let outcome = crate::processon::create_mind_data(&config, args.title, args.content)
        .await
        .map_err(tool_error)?;

    if !outcome.is_created() {
        log::warn!("ProcessOn rejected the mind map: {}", outcome.to_text());
    }

    text_result(outcome.to_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processon::test_support;
    use axum::{routing::post, Router};

    async fn spawn_endpoint(reply: &'static str) -> String {
        let router = Router::new().route(
            "/api/activity/mcp/chart/v2/create/mind",
            post(move || async move { reply }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn text_of(value: &serde_json::Value) -> &str {
        value["content"][0]["text"].as_str().unwrap()
    }

    fn create_args(title: &str, content: &str) -> Option<serde_json::Value> {
        Some(serde_json::json!({"title": title, "content": content}))
    }

    #[tokio::test]
    async fn test_check_returns_url_and_key() {
        let global = test_support::global("https://www.processon.com", Some("abc"));
        let value = handle_check(None, &global).await.unwrap();
        assert_eq!(text_of(&value), "https://www.processon.com:abc");
    }

    #[tokio::test]
    async fn test_check_without_key_fails() {
        let global = test_support::global("https://www.processon.com", None);
        let error = handle_check(None, &global).await.unwrap_err();
        assert_eq!(error.code, -32603);
        assert!(error.message.contains("PROCESSON_API_KEY"));
    }

    #[tokio::test]
    async fn test_create_without_key_fails_first() {
        let global = test_support::global("http://127.0.0.1:9", None);
        let error = handle_create_mind(create_args("", ""), &global)
            .await
            .unwrap_err();
        assert_eq!(error.code, -32603);
        assert!(error.message.contains("PROCESSON_API_KEY"));
    }

    #[tokio::test]
    async fn test_create_missing_arguments() {
        let global = test_support::global("http://127.0.0.1:9", Some("k"));
        let error = handle_create_mind(Some(serde_json::json!({"title": "x"})), &global)
            .await
            .unwrap_err();
        assert_eq!(error.code, -32602);
    }

    #[tokio::test]
    async fn test_create_empty_content_is_invalid() {
        let global = test_support::global("http://127.0.0.1:9", Some("k"));
        let error = handle_create_mind(create_args("Plan", "   \n  "), &global)
            .await
            .unwrap_err();
        assert_eq!(error.code, -32602);
    }

    #[tokio::test]
    async fn test_create_success_text() {
        let base = spawn_endpoint(r#"{"code":"200","data":{"chartId":"m1"}}"#).await;
        let global = test_support::global(&base, Some("k"));
        let value = handle_create_mind(create_args("Plan", "# Plan\n## Step"), &global)
            .await
            .unwrap();
        assert_eq!(text_of(&value), format!("Mind map created: {base}/mindmap/m1"));
    }

    #[tokio::test]
    async fn test_create_rejection_is_tool_output() {
        let base = spawn_endpoint(r#"{"code":"401","msg":"Invalid key"}"#).await;
        let global = test_support::global(&base, Some("k"));
        let value = handle_create_mind(create_args("Plan", "# Plan\n## Step"), &global)
            .await
            .unwrap();
        let text = text_of(&value);
        assert!(text.starts_with("Failed to create mind map: Invalid key"));
        assert!(text.contains("PROCESSON_API_KEY"));
        assert!(value.get("isError").is_none());
    }

    #[tokio::test]
    async fn test_create_missing_chart_id_is_error() {
        let base = spawn_endpoint(r#"{"code":"200","data":null}"#).await;
        let global = test_support::global(&base, Some("k"));
        let error = handle_create_mind(create_args("Plan", "# Plan"), &global)
            .await
            .unwrap_err();
        assert_eq!(error.code, -32603);
        assert!(error.message.contains("chartId"));
    }
}
