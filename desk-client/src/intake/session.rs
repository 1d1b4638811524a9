//! Intake session - drives the state machine against the API
//!
//! Every operation follows the same shape: apply a transition under the
//! write lock, release it, await the request, then re-acquire the lock to
//! merge the result. The lock is never held across a network call, so other
//! fields stay usable while a request is outstanding.
//!
//! Failures are reported twice: as a [`Notice`] on the session channel and
//! as the returned error.

use shared::{Asset, AssetCreate, Contact, ContactCreate, Ticket, ZoneSelection};
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info, warn};
use validator::Validate;

use super::draft::{AssetForm, ContactForm, TicketDetails, validation_messages};
use super::error::{IntakeError, IntakeResult};
use super::notice::{Notice, Redirect};
use super::resolve::resolve_ticket;
use super::state::{IntakeState, ZoneChange};
use crate::{ClientConfig, DeskApi};

/// Outcome of selecting a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneLoad {
    /// Zone did not change, nothing was reloaded
    Unchanged,
    /// Zone cleared
    Cleared,
    /// Customer list replaced
    Loaded(usize),
    /// A newer zone selection superseded this load
    Superseded,
}

/// Result of a successful submit
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub ticket: Ticket,
    pub zone_id: i64,
    pub redirect: Redirect,
}

/// One ticket-creation form session
pub struct IntakeSession<A: DeskApi> {
    api: A,
    config: ClientConfig,
    state: RwLock<IntakeState>,
    notices: mpsc::UnboundedSender<Notice>,
}

impl<A: DeskApi> IntakeSession<A> {
    /// Create a session and the receiver its notices are delivered to
    pub fn new(api: A, config: ClientConfig) -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            api,
            config,
            state: RwLock::new(IntakeState::new()),
            notices: tx,
        };
        (session, rx)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> IntakeState {
        self.state.read().await.clone()
    }

    fn notify(&self, notice: Notice) {
        // Receiver dropped means nobody is showing notices; not an error
        let _ = self.notices.send(notice);
    }

    fn fail<T>(&self, err: IntakeError) -> IntakeResult<T> {
        self.notify(Notice::error(err.to_string()));
        Err(err)
    }

    // ========== Zone catalog ==========

    /// Load the zone catalog. Called once when the form is shown.
    pub async fn mount(&self) -> IntakeResult<usize> {
        match self.api.list_zones(self.config.zone_limit).await {
            Ok(zones) => {
                let count = zones.len();
                self.state.write().await.zones_loaded(zones);
                Ok(count)
            }
            Err(source) => {
                warn!(error = %source, "Failed to load service zones");
                self.state.write().await.zones_failed();
                self.notify(Notice::error("Failed to load service zones"));
                Err(IntakeError::LoadFailed {
                    what: "service zones",
                    source,
                })
            }
        }
    }

    // ========== Cascade ==========

    /// Select a zone (or the all-zones filter) and load its customers
    pub async fn select_zone(&self, zone: Option<ZoneSelection>) -> IntakeResult<ZoneLoad> {
        let load = match self.state.write().await.zone_changed(zone) {
            ZoneChange::Unchanged => return Ok(ZoneLoad::Unchanged),
            ZoneChange::Cleared => return Ok(ZoneLoad::Cleared),
            ZoneChange::Load(load) => load,
        };

        debug!(generation = load.generation, scope = ?load.scope, "Loading customers");
        let result = self.api.list_customers(load.scope).await;

        let mut state = self.state.write().await;
        match result {
            Ok(customers) => {
                let count = customers.len();
                if !state.customers_loaded(&load, customers) {
                    return Ok(ZoneLoad::Superseded);
                }
                drop(state);
                if count == 0 {
                    self.notify(Notice::info("No customers found for the selected zone"));
                }
                Ok(ZoneLoad::Loaded(count))
            }
            Err(source) => {
                if !state.customers_failed(&load) {
                    return Ok(ZoneLoad::Superseded);
                }
                drop(state);
                warn!(error = %source, scope = ?load.scope, "Failed to load customers");
                let message = if load.scope == shared::CustomerScope::AllZones {
                    "Failed to load customers for all zones"
                } else {
                    "Failed to load customers for this zone"
                };
                self.notify(Notice::error(message));
                Err(IntakeError::LoadFailed {
                    what: "customers",
                    source,
                })
            }
        }
    }

    /// Select a customer; contacts and assets are taken from the loaded record.
    ///
    /// Returns `false` when the customer was already selected.
    pub async fn select_customer(&self, customer_id: Option<i64>) -> IntakeResult<bool> {
        let result = self.state.write().await.customer_changed(customer_id);
        match result {
            Ok(changed) => Ok(changed),
            Err(err) => self.fail(err),
        }
    }

    pub async fn select_contact(&self, contact_id: Option<i64>) -> IntakeResult<()> {
        let result = self.state.write().await.select_contact(contact_id);
        match result {
            Ok(()) => Ok(()),
            Err(err) => self.fail(err),
        }
    }

    pub async fn select_asset(&self, asset_id: Option<i64>) -> IntakeResult<()> {
        let result = self.state.write().await.select_asset(asset_id);
        match result {
            Ok(()) => Ok(()),
            Err(err) => self.fail(err),
        }
    }

    pub async fn set_details(&self, details: TicketDetails) {
        self.state.write().await.set_details(details);
    }

    // ========== Inline creation ==========

    pub async fn open_contact_dialog(&self) {
        self.state.write().await.open_contact_dialog();
    }

    pub async fn open_asset_dialog(&self) {
        self.state.write().await.open_asset_dialog();
    }

    async fn selected_customer_id(&self) -> Option<i64> {
        self.state.read().await.draft().customer_id
    }

    /// Create a contact for the selected customer and select it
    pub async fn create_contact(&self, form: ContactForm) -> IntakeResult<Contact> {
        let Some(customer_id) = self.selected_customer_id().await else {
            return self.fail(IntakeError::NoCustomerSelected);
        };
        let values = form.normalized();
        if let Err(errors) = values.validate() {
            self.state.write().await.contact_create_failed(form);
            return self.fail(IntakeError::Validation(validation_messages(&errors)));
        }

        let request = ContactCreate {
            name: values.name,
            phone: values.phone,
            email: values.email,
            customer_id,
        };

        match self.api.create_contact(&request).await {
            Ok(contact) => {
                info!(customer_id, contact_id = contact.id, "Contact created");
                self.state
                    .write()
                    .await
                    .contact_created(customer_id, contact.clone());
                self.notify(Notice::success(format!(
                    "Contact \"{}\" created successfully",
                    contact.name
                )));
                Ok(contact)
            }
            Err(source) => {
                warn!(customer_id, error = %source, "Failed to create contact");
                self.state.write().await.contact_create_failed(form);
                let message = source
                    .server_message()
                    .unwrap_or("Failed to create contact")
                    .to_string();
                self.fail(IntakeError::CreateFailed {
                    entity: "contact",
                    message,
                    source,
                })
            }
        }
    }

    /// Create an asset for the selected customer and select it
    pub async fn create_asset(&self, form: AssetForm) -> IntakeResult<Asset> {
        let Some(customer_id) = self.selected_customer_id().await else {
            return self.fail(IntakeError::NoCustomerSelected);
        };
        let values = form.normalized();
        if let Err(errors) = values.validate() {
            self.state.write().await.asset_create_failed(form);
            return self.fail(IntakeError::Validation(validation_messages(&errors)));
        }

        let request = AssetCreate {
            model: Some(values.model),
            serial_no: Some(values.serial_no),
            customer_id,
        };

        match self.api.create_asset(&request).await {
            Ok(asset) => {
                info!(customer_id, asset_id = asset.id, "Asset created");
                let label = asset.label();
                self.state
                    .write()
                    .await
                    .asset_created(customer_id, asset.clone());
                self.notify(Notice::success(format!(
                    "Asset \"{}\" created successfully",
                    label
                )));
                Ok(asset)
            }
            Err(source) => {
                warn!(customer_id, error = %source, "Failed to create asset");
                self.state.write().await.asset_create_failed(form);
                let message = source
                    .server_message()
                    .unwrap_or("Failed to create asset")
                    .to_string();
                self.fail(IntakeError::CreateFailed {
                    entity: "asset",
                    message,
                    source,
                })
            }
        }
    }

    // ========== Submit ==========

    /// Validate, resolve the effective zone and create the ticket.
    ///
    /// On success the form is reset and the returned [`Redirect`] says where
    /// to go once its delay has passed. On failure the draft is untouched.
    pub async fn submit(&self) -> IntakeResult<SubmitOutcome> {
        let resolved = {
            let state = self.state.read().await;
            resolve_ticket(&state)
        };
        let resolved = match resolved {
            Ok(resolved) => resolved,
            Err(IntakeError::Validation(messages)) => {
                let err = IntakeError::Validation(messages);
                self.notify(Notice::error(format!("Please fix the form: {}", err)));
                return Err(err);
            }
            Err(err) => return self.fail(err),
        };

        let zone_id = resolved.request.zone_id;
        debug!(
            customer_id = resolved.request.customer_id,
            zone_id, "Submitting ticket"
        );

        match self.api.create_ticket(&resolved.request).await {
            Ok(ticket) => {
                info!(ticket_id = ticket.id, zone_id, "Ticket created");
                self.notify(Notice::success(format!(
                    "Ticket #{} created for {} in {}",
                    ticket.id, resolved.company_name, resolved.zone_name
                )));
                self.state.write().await.reset_form();
                Ok(SubmitOutcome {
                    ticket,
                    zone_id,
                    redirect: Redirect {
                        to: self.config.redirect_path.clone(),
                        after: self.config.redirect_delay(),
                        refresh: true,
                    },
                })
            }
            Err(source) => {
                warn!(error = %source, "Failed to create ticket");
                let message = source.user_message();
                self.fail(IntakeError::CreateFailed {
                    entity: "ticket",
                    message,
                    source,
                })
            }
        }
    }
}
