//! Desk Client - ticket intake client for the service desk API
//!
//! Provides the REST client for zones, customers, contacts, assets and
//! tickets, and the intake session that drives the ticket creation form.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod intake;

pub use api::DeskApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::NetworkHttpClient;

// Re-export shared types for convenience
pub use shared::{
    Asset, CallType, Contact, Customer, CustomerScope, Priority, Ticket, Zone, ZoneSelection,
};

pub use intake::{
    AssetForm, ContactForm, IntakeError, IntakeSession, IntakeState, Notice, NoticeLevel,
    SubmitOutcome, TicketDetails, ZoneLoad,
};
