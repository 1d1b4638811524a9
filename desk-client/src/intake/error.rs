//! Intake workflow errors

use thiserror::Error;

use crate::ClientError;

/// Errors raised by intake operations
///
/// Every variant is also reported as a [`super::Notice`] by the session
/// before it is returned.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Zone catalog or customer list could not be loaded
    #[error("Failed to load {what}: {source}")]
    LoadFailed {
        what: &'static str,
        #[source]
        source: ClientError,
    },

    /// Customer picked before the list for the current zone arrived
    #[error("Customers are still loading")]
    CustomersLoading,

    /// Inline creation attempted without a selected customer
    #[error("Please select a customer first")]
    NoCustomerSelected,

    /// Server rejected a contact, asset or ticket
    #[error("{message}")]
    CreateFailed {
        entity: &'static str,
        message: String,
        #[source]
        source: ClientError,
    },

    /// Selected customer is not in the loaded list at submit time
    #[error("Customer not found")]
    CustomerNotFound { customer_id: i64 },

    /// Form values failed validation
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    /// Contact or asset id does not belong to the selected customer
    #[error("{entity} {id} does not belong to the selected customer")]
    NotInList { entity: &'static str, id: i64 },
}

pub type IntakeResult<T> = Result<T, IntakeError>;
