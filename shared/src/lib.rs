//! Shared types for the service desk
//!
//! Wire models and response adapters used by the desk client and by test
//! servers that stand in for the REST API.

pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Asset, AssetCreate, CallType, Contact, ContactCreate, CreateTicketRequest, Customer,
    CustomerScope, Priority, ServicePerson, Ticket, Zone, ZoneSelection,
};
pub use response::{ApiErrorBody, ListPayload, Pagination};
