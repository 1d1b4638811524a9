//! Ticket intake
//!
//! The dependent-selection workflow behind the ticket creation form:
//! zone catalog, customers scoped to a zone (or all zones), the selected
//! customer's contacts and assets, inline creation of contacts/assets and
//! resolution of the zone persisted with the ticket.

mod draft;
mod error;
mod notice;
mod resolve;
mod session;
mod state;

pub use draft::{
    AssetForm, ContactForm, InlineDialog, TicketDetails, TicketDraft, validation_messages,
};
pub use error::{IntakeError, IntakeResult};
pub use notice::{Notice, NoticeLevel, Redirect};
pub use resolve::{ResolvedTicket, effective_zone_id, resolve_ticket, zone_display_name};
pub use session::{IntakeSession, SubmitOutcome, ZoneLoad};
pub use state::{CustomerLoad, IntakeState, ZoneChange};
