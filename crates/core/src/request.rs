//! Request model for the mind-map creation endpoint.

use serde::{Deserialize, Serialize};

/// Default ProcessOn host.
pub const DEFAULT_BASE_URL: &str = "https://www.processon.com";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Mcp-ApiKey";

/// Endpoint revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    #[default]
    V2,
}

/// How the request body is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    Json,
    /// `application/x-www-form-urlencoded`
    #[default]
    Form,
}

/// Body of a create request. Field names are the ones the endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMindRequest {
    pub file_type: String,
    pub folder: String,
    pub category: String,
    pub file_name: String,
    pub def: String,
}

impl CreateMindRequest {
    /// A mind map named `file_name` in the root folder.
    pub fn new(file_name: impl Into<String>, def: impl Into<String>) -> Self {
        CreateMindRequest {
            file_type: "mind".to_string(),
            folder: "root".to_string(),
            category: "mind".to_string(),
            file_name: file_name.into(),
            def: def.into(),
        }
    }
}

/// Strip trailing slashes so paths can be appended with `/`.
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Full URL of the create endpoint.
pub fn create_mind_url(base_url: &str, version: ApiVersion) -> String {
    let base_url = normalize_base_url(base_url);
    match version {
        ApiVersion::V1 => format!("{base_url}/api/activity/mcp/chart/create/mind"),
        ApiVersion::V2 => format!("{base_url}/api/activity/mcp/chart/v2/create/mind"),
    }
}
