//! Chart spec as serialized by the server's plotting layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A chart description: trace list plus layout object.
///
/// The server sends each chart as a JSON string inside the payload, so a
/// spec is decoded twice: once as part of [`crate::ChartPayload`] and once
/// here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub layout: Map<String, Value>,
}

impl ChartSpec {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn title(&self) -> Option<&str> {
        match self.layout.get("title")? {
            Value::String(s) => Some(s),
            Value::Object(obj) => obj.get("text")?.as_str(),
            _ => None,
        }
    }
}
