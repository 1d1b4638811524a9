//! API Response types
//!
//! The service desk API is not uniform: some list endpoints wrap their
//! items as `{ "data": [...], "pagination": {...} }`, others return the
//! bare array. [`ListPayload`] accepts both and is flattened on receipt.

use serde::{Deserialize, Serialize};

/// Pagination block of wrapped list responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// List response in either of the shapes the API produces
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped {
        data: Vec<T>,
        #[serde(default)]
        pagination: Option<Pagination>,
    },
}

impl<T> ListPayload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Wrapped { data, .. } => data,
            ListPayload::Bare(items) => items,
        }
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        match self {
            ListPayload::Wrapped { pagination, .. } => pagination.as_ref(),
            ListPayload::Bare(_) => None,
        }
    }
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Most specific message: `message` first, then `error`
    pub fn preferred_message(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|m| !m.is_empty())
    }
}
