//! Asset Model
//!
//! The API is inconsistent about the serial field name (`serialNo` in some
//! responses, `serialNumber` in others). [`AssetWire`] accepts both and is
//! folded into the canonical [`Asset`] as soon as it is decoded.

use serde::{Deserialize, Serialize};

/// Customer asset (machine under service)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AssetWire", rename_all = "camelCase")]
pub struct Asset {
    pub id: i64,
    pub model: Option<String>,
    pub serial_no: Option<String>,
}

impl Asset {
    /// Human readable label: model, then serial, then the id
    pub fn label(&self) -> String {
        match (non_empty(&self.model), non_empty(&self.serial_no)) {
            (Some(model), Some(serial)) => format!("{} ({})", model, serial),
            (Some(model), None) => model.to_string(),
            (None, Some(serial)) => serial.to_string(),
            (None, None) => format!("Asset #{}", self.id),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Asset as it appears on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetWire {
    pub id: i64,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_no: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
}

impl From<AssetWire> for Asset {
    fn from(wire: AssetWire) -> Self {
        let serial_no = wire
            .serial_no
            .filter(|s| !s.is_empty())
            .or(wire.serial_number);
        Self {
            id: wire.id,
            model: wire.model,
            serial_no,
        }
    }
}

/// Create asset payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_no: Option<String>,
    pub customer_id: i64,
}
