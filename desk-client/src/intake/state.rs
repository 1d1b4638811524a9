//! Intake state machine
//!
//! Holds the zone catalog, the customer list for the current zone filter,
//! the contact/asset lists of the selected customer and the ticket draft.
//! Transitions are synchronous and never touch the network, so the cascade
//! rules can be tested directly:
//!
//! - zone change: customer, contact and asset are cleared
//! - customer change: contact and asset are cleared, then a lone contact or
//!   asset is selected automatically
//! - creation: the new entity joins both the live list and the cached
//!   customer record and becomes the selection
//!
//! Customer loads are tagged with a generation number. A load result is
//! applied only if no newer zone change happened since it was issued.

use shared::{Asset, Contact, Customer, CustomerScope, Zone, ZoneSelection};
use tracing::debug;

use super::draft::{AssetForm, ContactForm, InlineDialog, TicketDetails, TicketDraft};
use super::error::{IntakeError, IntakeResult};

/// Token identifying one customer load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerLoad {
    pub generation: u64,
    pub scope: CustomerScope,
}

/// Effect of a zone change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneChange {
    /// Same zone as before, nothing was reset
    Unchanged,
    /// Zone cleared, no request needed
    Cleared,
    /// Customers must be fetched for the new zone
    Load(CustomerLoad),
}

#[derive(Debug, Clone, Default)]
pub struct IntakeState {
    zones: Vec<Zone>,
    customers: Vec<Customer>,
    contacts: Vec<Contact>,
    assets: Vec<Asset>,
    draft: TicketDraft,
    loading_customers: bool,
    customer_generation: u64,
    contact_dialog: InlineDialog<ContactForm>,
    asset_dialog: InlineDialog<AssetForm>,
}

impl IntakeState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Accessors ==========

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn draft(&self) -> &TicketDraft {
        &self.draft
    }

    /// Direct draft access for tests that need states the transitions never produce
    #[cfg(test)]
    pub(crate) fn draft_mut(&mut self) -> &mut TicketDraft {
        &mut self.draft
    }

    pub fn contact_dialog(&self) -> &InlineDialog<ContactForm> {
        &self.contact_dialog
    }

    pub fn asset_dialog(&self) -> &InlineDialog<AssetForm> {
        &self.asset_dialog
    }

    pub fn is_loading_customers(&self) -> bool {
        self.loading_customers
    }

    pub fn customer_generation(&self) -> u64 {
        self.customer_generation
    }

    pub fn find_customer(&self, customer_id: i64) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    pub fn selected_customer(&self) -> Option<&Customer> {
        self.draft.customer_id.and_then(|id| self.find_customer(id))
    }

    pub fn find_zone(&self, zone_id: i64) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == zone_id)
    }

    /// Customer dropdown needs a zone and a settled customer list
    pub fn customer_selector_enabled(&self) -> bool {
        self.draft.zone.is_some() && !self.loading_customers
    }

    /// Contact and asset dropdowns need a selected customer
    pub fn dependent_selectors_enabled(&self) -> bool {
        self.draft.customer_id.is_some()
    }

    // ========== Zone catalog ==========

    pub fn zones_loaded(&mut self, zones: Vec<Zone>) {
        self.zones = zones;
    }

    pub fn zones_failed(&mut self) {
        self.zones.clear();
    }

    // ========== Zone / customer cascade ==========

    /// Apply a zone selection.
    ///
    /// Any change invalidates loads still in flight, even a change to no zone.
    pub fn zone_changed(&mut self, zone: Option<ZoneSelection>) -> ZoneChange {
        if self.draft.zone == zone {
            return ZoneChange::Unchanged;
        }

        self.draft.zone = zone;
        self.customer_generation += 1;
        self.clear_customer_selection();

        match zone {
            None => {
                self.customers.clear();
                self.loading_customers = false;
                ZoneChange::Cleared
            }
            Some(selection) => {
                // The previous zone's customers must not be selectable meanwhile
                self.customers.clear();
                self.loading_customers = true;
                let scope = match selection {
                    ZoneSelection::All => CustomerScope::AllZones,
                    ZoneSelection::Zone(id) => CustomerScope::Zone(id),
                };
                ZoneChange::Load(CustomerLoad {
                    generation: self.customer_generation,
                    scope,
                })
            }
        }
    }

    fn is_current(&self, load: &CustomerLoad) -> bool {
        load.generation == self.customer_generation
    }

    /// Apply a customer list. Returns `false` when the load is stale.
    pub fn customers_loaded(&mut self, load: &CustomerLoad, customers: Vec<Customer>) -> bool {
        if !self.is_current(load) {
            debug!(
                generation = load.generation,
                current = self.customer_generation,
                "Discarding stale customer list"
            );
            return false;
        }
        self.customers = customers;
        self.loading_customers = false;
        self.clear_customer_selection();
        true
    }

    /// Apply a failed load. Returns `false` when the load is stale.
    pub fn customers_failed(&mut self, load: &CustomerLoad) -> bool {
        if !self.is_current(load) {
            debug!(generation = load.generation, "Discarding stale customer load failure");
            return false;
        }
        self.customers.clear();
        self.loading_customers = false;
        self.clear_customer_selection();
        true
    }

    fn clear_customer_selection(&mut self) {
        self.draft.customer_id = None;
        self.draft.contact_id = None;
        self.draft.asset_id = None;
        self.contacts.clear();
        self.assets.clear();
    }

    /// Apply a customer selection. Returns `false` if it was already selected.
    ///
    /// Rejected while the customer list for a new zone is still loading.
    pub fn customer_changed(&mut self, customer_id: Option<i64>) -> IntakeResult<bool> {
        if customer_id.is_some() && self.loading_customers {
            return Err(IntakeError::CustomersLoading);
        }
        if self.draft.customer_id == customer_id {
            return Ok(false);
        }

        self.draft.customer_id = customer_id;
        self.draft.contact_id = None;
        self.draft.asset_id = None;

        let (contacts, assets) = match customer_id.and_then(|id| self.find_customer(id)) {
            Some(customer) => (customer.contacts.clone(), customer.assets.clone()),
            None => (Vec::new(), Vec::new()),
        };
        self.contacts = contacts;
        self.assets = assets;

        if let [only] = self.contacts.as_slice() {
            self.draft.contact_id = Some(only.id);
        }
        if let [only] = self.assets.as_slice() {
            self.draft.asset_id = Some(only.id);
        }
        Ok(true)
    }

    pub fn select_contact(&mut self, contact_id: Option<i64>) -> IntakeResult<()> {
        if let Some(id) = contact_id {
            if !self.contacts.iter().any(|c| c.id == id) {
                return Err(IntakeError::NotInList {
                    entity: "Contact",
                    id,
                });
            }
        }
        self.draft.contact_id = contact_id;
        Ok(())
    }

    pub fn select_asset(&mut self, asset_id: Option<i64>) -> IntakeResult<()> {
        if let Some(id) = asset_id {
            if !self.assets.iter().any(|a| a.id == id) {
                return Err(IntakeError::NotInList { entity: "Asset", id });
            }
        }
        self.draft.asset_id = asset_id;
        Ok(())
    }

    pub fn set_details(&mut self, details: TicketDetails) {
        self.draft.details = details;
    }

    // ========== Inline creation ==========

    pub fn open_contact_dialog(&mut self) {
        self.contact_dialog.show();
    }

    pub fn open_asset_dialog(&mut self) {
        self.asset_dialog.show();
    }

    /// Contact creation failed: keep the dialog open with the entered values
    pub fn contact_create_failed(&mut self, form: ContactForm) {
        self.contact_dialog.keep(form);
    }

    pub fn asset_create_failed(&mut self, form: AssetForm) {
        self.asset_dialog.keep(form);
    }

    /// Merge a contact the server created for `customer_id`.
    ///
    /// The cached customer record always receives it; the live list and the
    /// selection only if that customer is still selected.
    pub fn contact_created(&mut self, customer_id: i64, contact: Contact) {
        if let Some(customer) = self.customers.iter_mut().find(|c| c.id == customer_id) {
            if !customer.has_contact(contact.id) {
                customer.contacts.push(contact.clone());
            }
        }
        if self.draft.customer_id == Some(customer_id) {
            self.draft.contact_id = Some(contact.id);
            if !self.contacts.iter().any(|c| c.id == contact.id) {
                self.contacts.push(contact);
            }
        }
        self.contact_dialog.close_and_reset();
    }

    pub fn asset_created(&mut self, customer_id: i64, asset: Asset) {
        if let Some(customer) = self.customers.iter_mut().find(|c| c.id == customer_id) {
            if !customer.has_asset(asset.id) {
                customer.assets.push(asset.clone());
            }
        }
        if self.draft.customer_id == Some(customer_id) {
            self.draft.asset_id = Some(asset.id);
            if !self.assets.iter().any(|a| a.id == asset.id) {
                self.assets.push(asset);
            }
        }
        self.asset_dialog.close_and_reset();
    }

    // ========== Submit ==========

    /// Back to defaults after a successful submit. The zone catalog is kept.
    pub fn reset_form(&mut self) {
        self.zone_changed(None);
        self.draft = TicketDraft::default();
        self.contact_dialog.close_and_reset();
        self.asset_dialog.close_and_reset();
    }
}
