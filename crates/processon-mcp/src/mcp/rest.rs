use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub async fn run_rest(options: super::cli::RestOptions, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);
    let endpoint = options.endpoint_path();

    if global.verbose {
        eprintln!("Starting MCP server with HTTP transport on {addr}...");
        eprintln!("JSON-RPC endpoint: http://{addr}{endpoint}");
    }
    log::info!("serving MCP on http://{addr}{endpoint}");

    let app_router = router(&endpoint, global);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// Router serving JSON-RPC on `endpoint`
pub fn router(endpoint: &str, global: crate::Global) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(endpoint, post(message_handler))
        .layer(cors)
        .with_state(Arc::new(global))
}

async fn message_handler(
    State(global): State<Arc<crate::Global>>,
    body: String,
) -> Response {
    // Malformed bodies get a JSON-RPC parse error, not an extractor rejection.
    match super::handle_request(&body, &global).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processon::test_support;

    async fn spawn_server(endpoint: &str) -> String {
        let app = router(endpoint, test_support::global("http://127.0.0.1:9", Some("k")));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_rest_endpoint_answers_tools_list() {
        let base = spawn_server("/rest").await;
        let response: serde_json::Value = reqwest::Client::new()
            .post(format!("{base}/rest"))
            .json(&serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(response["id"], 1);
        let names: Vec<_> = response["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["check", "createProcessOnMind"]);
    }

    #[tokio::test]
    async fn test_rest_notification_is_accepted_without_body() {
        let base = spawn_server("/mcp").await;
        let response = reqwest::Client::new()
            .post(format!("{base}/mcp"))
            .json(&serde_json::json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_rest_malformed_body_is_parse_error() {
        let base = spawn_server("/rest").await;
        let response = reqwest::Client::new()
            .post(format!("{base}/rest"))
            .header("content-type", "text/plain")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"]["code"], -32700);
        assert_eq!(body["id"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_rest_other_paths_are_not_served() {
        let base = spawn_server("/rest").await;
        let response = reqwest::Client::new()
            .post(format!("{base}/elsewhere"))
            .json(&serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
