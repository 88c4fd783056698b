//! Pure interpretation of the mind-map creation response.
//!
//! The endpoint always answers with an application-level `code`. Anything
//! other than `"200"` is a rejection that is reported back to the caller as
//! text, not as an error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::MindMapError;
use crate::request::normalize_base_url;

pub const CODE_SUCCESS: &str = "200";
pub const CODE_UNAUTHORIZED: &str = "401";
pub const CODE_MEMBERSHIP_REQUIRED: &str = "815";

const UNKNOWN_ERROR: &str = "Unknown error";
const MEMBERSHIP_NOTICE: &str = ", please upgrade your membership to use this feature!";
const API_KEY_NOTICE: &str = ", please check the PROCESSON_API_KEY configuration!";

// ============================================================================
// Domain Models (Input from API)
// ============================================================================

/// Raw response body of the create endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMindResponse {
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl CreateMindResponse {
    /// `data.chartId`, as a string even when the server sends a number.
    pub fn chart_id(&self) -> Option<String> {
        match self.data.as_ref()?.get("chartId")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// ============================================================================
// Output Models (Domain Model)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CreateOutcome {
    Created {
        chart_id: String,
        file_url: String,
    },
    Rejected {
        code: Option<String>,
        message: String,
    },
}

impl CreateOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created { .. })
    }

    /// Text handed back to the tool caller.
    pub fn to_text(&self) -> String {
        match self {
            CreateOutcome::Created { file_url, .. } => format!("Mind map created: {file_url}"),
            CreateOutcome::Rejected { message, .. } => {
                format!("Failed to create mind map: {message}")
            }
        }
    }
}

// ============================================================================
// Pure Transformation Functions
// ============================================================================

/// Shareable link of a created mind map.
pub fn mind_map_url(base_url: &str, chart_id: &str) -> String {
    format!("{}/mindmap/{chart_id}", normalize_base_url(base_url))
}

/// Message for a rejected request, with a hint for the codes that have one.
pub fn rejection_message(code: Option<&str>, msg: Option<&str>) -> String {
    let mut message = msg
        .filter(|m| !m.is_empty())
        .unwrap_or(UNKNOWN_ERROR)
        .to_string();
    match code {
        Some(CODE_MEMBERSHIP_REQUIRED) => message.push_str(MEMBERSHIP_NOTICE),
        Some(CODE_UNAUTHORIZED) => message.push_str(API_KEY_NOTICE),
        _ => {}
    }
    message
}

/// Map a response body to an outcome.
///
/// A success code without `chartId` is a protocol error: there is no link to
/// hand back.
pub fn interpret_response(
    response: CreateMindResponse,
    base_url: &str,
) -> Result<CreateOutcome, MindMapError> {
    if response.code.as_deref() == Some(CODE_SUCCESS) {
        let chart_id = response.chart_id().ok_or_else(|| {
            MindMapError::Protocol("response reported success but has no chartId".to_string())
        })?;
        return Ok(CreateOutcome::Created {
            file_url: mind_map_url(base_url, &chart_id),
            chart_id,
        });
    }

    Ok(CreateOutcome::Rejected {
        message: rejection_message(response.code.as_deref(), response.msg.as_deref()),
        code: response.code,
    })
}
