//! Serde shapes for the Nimble API response envelope.
//!
//! Request payloads are the public parameter types in [`crate::types`], which
//! serialize directly. The response side is deliberately absence-tolerant:
//! every field defaults, so a sparse or empty envelope never fails to decode.

use serde::Deserialize;

fn default_position() -> i64 {
    -1
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResponseEnvelope {
    #[serde(default)]
    pub body: Vec<WireDocument>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireDocument {
    #[serde(default)]
    pub page_content: String,
    #[serde(default)]
    pub metadata: WireMetadata,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_position")]
    pub position: i64,
    #[serde(default)]
    pub entity_type: String,
}

impl Default for WireMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            snippet: String::new(),
            url: String::new(),
            position: default_position(),
            entity_type: String::new(),
        }
    }
}
