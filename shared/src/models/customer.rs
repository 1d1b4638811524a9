//! Customer Model

use serde::{Deserialize, Serialize};

use super::{Asset, Contact};

/// Customer with its embedded contacts and assets
///
/// `service_zone_id` is the customer's home zone regardless of which zone
/// filter was used to list it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub company_name: String,
    pub service_zone_id: i64,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Customer {
    pub fn has_contact(&self, contact_id: i64) -> bool {
        self.contacts.iter().any(|c| c.id == contact_id)
    }

    pub fn has_asset(&self, asset_id: i64) -> bool {
        self.assets.iter().any(|a| a.id == asset_id)
    }
}

/// Which customers to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerScope {
    /// Customers whose home zone is the given zone
    Zone(i64),
    /// Every customer across all zones
    AllZones,
}

impl CustomerScope {
    /// Query string for `GET /customers`, related records always embedded
    pub fn query(&self) -> String {
        match self {
            CustomerScope::Zone(id) => format!("serviceZoneId={}&include=contacts,assets", id),
            CustomerScope::AllZones => "include=contacts,assets".to_string(),
        }
    }
}
