//! Submit-time resolution of the ticket payload

use shared::{CreateTicketRequest, ZoneSelection, models::parse_related_machine_ids};
use validator::Validate;

use super::draft::validation_messages;
use super::error::{IntakeError, IntakeResult};
use super::state::IntakeState;

/// Ticket payload plus what the success notice needs to name
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTicket {
    pub request: CreateTicketRequest,
    pub company_name: String,
    pub zone_name: String,
}

/// Zone id to persist for the current draft.
///
/// A concrete zone is used as is. The all-zones filter resolves to the
/// selected customer's home zone; if that customer is not loaded the submit
/// is aborted rather than sending an unresolved zone.
pub fn effective_zone_id(state: &IntakeState) -> IntakeResult<i64> {
    let draft = state.draft();
    match draft.zone {
        Some(ZoneSelection::Zone(id)) => Ok(id),
        Some(ZoneSelection::All) => {
            let customer_id = draft.customer_id.ok_or_else(|| {
                IntakeError::Validation(vec!["Please select a customer".to_string()])
            })?;
            state
                .find_customer(customer_id)
                .map(|c| c.service_zone_id)
                .ok_or(IntakeError::CustomerNotFound { customer_id })
        }
        None => Err(IntakeError::Validation(vec!["Please select a zone".to_string()])),
    }
}

/// Display name of a zone, falling back to its id
pub fn zone_display_name(state: &IntakeState, zone_id: i64) -> String {
    state
        .find_zone(zone_id)
        .map(|z| z.name.clone())
        .unwrap_or_else(|| format!("Zone {}", zone_id))
}

/// Validate the draft and build the create-ticket payload
pub fn resolve_ticket(state: &IntakeState) -> IntakeResult<ResolvedTicket> {
    let draft = state.draft().normalized();
    draft
        .validate()
        .map_err(|e| IntakeError::Validation(validation_messages(&e)))?;

    let zone_id = effective_zone_id(state)?;

    let missing = |field: &str| IntakeError::Validation(vec![format!("Please select {}", field)]);
    let customer_id = draft.customer_id.ok_or_else(|| missing("a customer"))?;
    let contact_id = draft.contact_id.ok_or_else(|| missing("a contact"))?;
    let asset_id = draft.asset_id.ok_or_else(|| missing("an asset"))?;
    let call_type = draft
        .details
        .call_type
        .ok_or_else(|| IntakeError::Validation(vec!["Call type is required".to_string()]))?;

    let company_name = state
        .find_customer(customer_id)
        .map(|c| c.company_name.clone())
        .unwrap_or_else(|| format!("Customer #{}", customer_id));

    let details = &draft.details;
    let request = CreateTicketRequest {
        title: details.title.clone(),
        description: details.description.clone(),
        priority: details.priority,
        call_type,
        customer_id,
        contact_id,
        asset_id,
        zone_id,
        error_details: details.error_details.clone(),
        related_machine_ids: parse_related_machine_ids(details.related_machine_ids.as_deref()),
    };

    Ok(ResolvedTicket {
        request,
        company_name,
        zone_name: zone_display_name(state, zone_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::draft::TicketDetails;
    use crate::intake::state::ZoneChange;
    use shared::{Asset, CallType, Contact, Customer, Priority, Zone};

    fn acme(zone_id: i64) -> Customer {
        Customer {
            id: 10,
            name: Some("Acme".into()),
            company_name: "Acme Ltd".into(),
            service_zone_id: zone_id,
            contacts: vec![Contact {
                id: 100,
                name: "Bob".into(),
                email: None,
                phone: None,
            }],
            assets: vec![Asset {
                id: 55,
                model: Some("X200".into()),
                serial_no: Some("SN-1".into()),
            }],
        }
    }

    fn details() -> TicketDetails {
        TicketDetails {
            title: " Printer jam ".into(),
            description: "Paper jams on every print job".into(),
            priority: Priority::High,
            call_type: Some(CallType::UnderMaintenanceContract),
            error_details: Some("   ".into()),
            related_machine_ids: Some("M-1, M-2".into()),
        }
    }

    fn state_for(zone: ZoneSelection, customers: Vec<Customer>) -> IntakeState {
        let mut state = IntakeState::new();
        state.zones_loaded(vec![
            Zone {
                id: 1,
                name: "North".into(),
                is_active: true,
                service_persons: vec![],
            },
            Zone {
                id: 7,
                name: "Harbour".into(),
                is_active: true,
                service_persons: vec![],
            },
        ]);
        let ZoneChange::Load(load) = state.zone_changed(Some(zone)) else {
            panic!("expected a load");
        };
        state.customers_loaded(&load, customers);
        state.set_details(details());
        state
    }

    #[test]
    fn test_concrete_zone_passes_through() {
        let mut state = state_for(ZoneSelection::Zone(1), vec![acme(1)]);
        state.customer_changed(Some(10)).unwrap();

        let resolved = resolve_ticket(&state).unwrap();
        assert_eq!(resolved.request.zone_id, 1);
        assert_eq!(resolved.request.customer_id, 10);
        assert_eq!(resolved.request.contact_id, 100);
        assert_eq!(resolved.request.asset_id, 55);
        assert_eq!(resolved.request.title, "Printer jam");
        assert_eq!(resolved.request.error_details, None);
        assert_eq!(
            resolved.request.related_machine_ids,
            Some(vec!["M-1".to_string(), "M-2".to_string()])
        );
        assert_eq!(resolved.company_name, "Acme Ltd");
        assert_eq!(resolved.zone_name, "North");
    }

    #[test]
    fn test_all_zones_resolves_to_customer_zone() {
        let mut state = state_for(ZoneSelection::All, vec![acme(7)]);
        state.customer_changed(Some(10)).unwrap();

        assert_eq!(effective_zone_id(&state).unwrap(), 7);
        let resolved = resolve_ticket(&state).unwrap();
        assert_eq!(resolved.request.zone_id, 7);
        assert_eq!(resolved.zone_name, "Harbour");

        let json = serde_json::to_value(&resolved.request).unwrap();
        assert_eq!(json["zoneId"], 7);
    }

    #[test]
    fn test_unknown_zone_name_falls_back_to_id() {
        let mut state = state_for(ZoneSelection::All, vec![acme(42)]);
        state.customer_changed(Some(10)).unwrap();
        let resolved = resolve_ticket(&state).unwrap();
        assert_eq!(resolved.zone_name, "Zone 42");
    }

    #[test]
    fn test_missing_customer_aborts_under_all_zones() {
        let mut state = state_for(ZoneSelection::All, vec![acme(7)]);
        // Selection points at a customer that is not loaded
        state.customer_changed(Some(99)).unwrap();

        let err = effective_zone_id(&state).unwrap_err();
        assert!(matches!(err, IntakeError::CustomerNotFound { customer_id: 99 }));
        assert_eq!(err.to_string(), "Customer not found");

        // Even a fully filled draft must not resolve
        state.draft_mut().contact_id = Some(100);
        state.draft_mut().asset_id = Some(55);
        let err = resolve_ticket(&state).unwrap_err();
        assert!(matches!(err, IntakeError::CustomerNotFound { customer_id: 99 }));
    }

    #[test]
    fn test_validation_runs_before_resolution() {
        let state = state_for(ZoneSelection::Zone(1), vec![acme(1)]);
        let err = resolve_ticket(&state).unwrap_err();
        let IntakeError::Validation(messages) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            messages,
            vec![
                "Please select an asset",
                "Please select a contact",
                "Please select a customer"
            ]
        );
    }

    #[test]
    fn test_whitespace_title_blocks_submit() {
        let mut state = state_for(ZoneSelection::Zone(1), vec![acme(1)]);
        state.customer_changed(Some(10)).unwrap();
        state.draft_mut().details.title = "    ".into();
        state.draft_mut().details.error_details = Some("  ".into());

        let err = resolve_ticket(&state).unwrap_err();
        let IntakeError::Validation(messages) = err else {
            panic!("expected validation error");
        };
        assert_eq!(messages, vec!["Title must be at least 3 characters"]);

        state.draft_mut().details.title = "  Printer jam  ".into();
        let resolved = resolve_ticket(&state).unwrap();
        assert_eq!(resolved.request.title, "Printer jam");
        assert_eq!(resolved.request.error_details, None);
    }
}
