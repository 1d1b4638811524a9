//! Service desk API endpoints used by ticket intake

use async_trait::async_trait;
use shared::{
    Asset, AssetCreate, Contact, ContactCreate, CreateTicketRequest, Customer, CustomerScope,
    ListPayload, Ticket, Zone,
};
use tracing::info;

use crate::{ClientResult, NetworkHttpClient};

/// Remote operations the intake session depends on
#[async_trait]
pub trait DeskApi: Send + Sync {
    /// `GET /service-zones?limit=<limit>`
    async fn list_zones(&self, limit: u32) -> ClientResult<Vec<Zone>>;

    /// `GET /customers?...&include=contacts,assets`
    async fn list_customers(&self, scope: CustomerScope) -> ClientResult<Vec<Customer>>;

    /// `POST /contacts`
    async fn create_contact(&self, contact: &ContactCreate) -> ClientResult<Contact>;

    /// `POST /assets`
    async fn create_asset(&self, asset: &AssetCreate) -> ClientResult<Asset>;

    /// `POST /tickets`
    async fn create_ticket(&self, ticket: &CreateTicketRequest) -> ClientResult<Ticket>;
}

#[async_trait]
impl DeskApi for NetworkHttpClient {
    async fn list_zones(&self, limit: u32) -> ClientResult<Vec<Zone>> {
        let payload: ListPayload<Zone> = self
            .get(&format!("/service-zones?limit={}", limit))
            .await?;
        let zones = payload.into_items();
        info!(count = zones.len(), "Loaded service zones");
        Ok(zones)
    }

    async fn list_customers(&self, scope: CustomerScope) -> ClientResult<Vec<Customer>> {
        let payload: ListPayload<Customer> =
            self.get(&format!("/customers?{}", scope.query())).await?;
        let customers = payload.into_items();
        info!(scope = ?scope, count = customers.len(), "Loaded customers");
        Ok(customers)
    }

    async fn create_contact(&self, contact: &ContactCreate) -> ClientResult<Contact> {
        self.post("/contacts", contact).await
    }

    async fn create_asset(&self, asset: &AssetCreate) -> ClientResult<Asset> {
        self.post("/assets", asset).await
    }

    async fn create_ticket(&self, ticket: &CreateTicketRequest) -> ClientResult<Ticket> {
        self.post("/tickets", ticket).await
    }
}
