use super::aggregator::AggregatedResult;
use crate::error::{Error, SearchResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Machine-readable part of a search response
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredPayload {
    pub items: Vec<Map<String, Value>>,
    pub sources_searched: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources_failed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
    pub has_more: bool,
}

/// Outcome of a successful search
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub result: AggregatedResult,
    pub text: String,
    pub structured: StructuredPayload,
}

/// What a calling agent receives, success or not
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub is_error: bool,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured: Option<StructuredPayload>,
}

impl ToolResponse {
    pub fn success(response: SearchResponse) -> Self {
        Self {
            is_error: false,
            text: response.text,
            structured: Some(response.structured),
        }
    }

    /// Error response; never carries a partial payload
    pub fn failure(error: &Error) -> Self {
        Self {
            is_error: true,
            text: error.to_string(),
            structured: None,
        }
    }
}

impl From<SearchResult<SearchResponse>> for ToolResponse {
    fn from(result: SearchResult<SearchResponse>) -> Self {
        match result {
            Ok(response) => ToolResponse::success(response),
            Err(e) => ToolResponse::failure(&e),
        }
    }
}
