//! Form values for ticket intake and the inline creation dialogs

use shared::{CallType, Priority, ZoneSelection};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Free-text part of the ticket form
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct TicketDetails {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
    pub priority: Priority,
    #[validate(required(message = "Call type is required"))]
    pub call_type: Option<CallType>,
    pub error_details: Option<String>,
    /// Comma separated machine ids as typed by the user
    pub related_machine_ids: Option<String>,
}

/// Ticket form state for one intake session
///
/// The selection fields are only changed through [`super::IntakeState`]
/// transitions, which keep them consistent with the loaded lists.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct TicketDraft {
    #[validate(nested)]
    pub details: TicketDetails,
    #[validate(required(message = "Please select a zone"))]
    pub zone: Option<ZoneSelection>,
    #[validate(required(message = "Please select a customer"))]
    pub customer_id: Option<i64>,
    #[validate(required(message = "Please select a contact"))]
    pub contact_id: Option<i64>,
    #[validate(required(message = "Please select an asset"))]
    pub asset_id: Option<i64>,
}

/// Inline "new contact" form
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

/// Inline "new asset" form
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct AssetForm {
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_no: String,
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

fn trimmed_opt(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl TicketDetails {
    /// Values as they are sent: surrounding whitespace removed, blank
    /// optional text dropped. Validation runs on this form.
    pub fn normalized(&self) -> Self {
        Self {
            title: trimmed(&self.title),
            description: trimmed(&self.description),
            priority: self.priority,
            call_type: self.call_type,
            error_details: trimmed_opt(self.error_details.as_deref()),
            related_machine_ids: self.related_machine_ids.clone(),
        }
    }
}

impl TicketDraft {
    pub fn normalized(&self) -> Self {
        Self {
            details: self.details.normalized(),
            ..self.clone()
        }
    }
}

impl ContactForm {
    /// Trimmed values; a blank email means no email
    pub fn normalized(&self) -> Self {
        Self {
            name: trimmed(&self.name),
            phone: trimmed(&self.phone),
            email: trimmed_opt(self.email.as_deref()),
        }
    }
}

impl AssetForm {
    pub fn normalized(&self) -> Self {
        Self {
            model: trimmed(&self.model),
            serial_no: trimmed(&self.serial_no),
        }
    }
}

/// Creation dialog: whether it is shown and what it currently holds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineDialog<F> {
    pub open: bool,
    pub form: F,
}

impl<F: Default> InlineDialog<F> {
    pub fn show(&mut self) {
        self.open = true;
    }

    /// Keep the dialog open with the values the user entered
    pub fn keep(&mut self, form: F) {
        self.open = true;
        self.form = form;
    }

    pub fn close_and_reset(&mut self) {
        self.open = false;
        self.form = F::default();
    }
}

/// Flatten validation errors into display messages, ordered by field path
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect_messages(errors, "", &mut out);
    out.sort();
    out.into_iter().map(|(_, message)| message).collect()
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<(String, String)>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", path));
                    out.push((path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> TicketDraft {
        TicketDraft {
            details: TicketDetails {
                title: "Printer jam".into(),
                description: "Paper jams on every print job".into(),
                priority: Priority::High,
                call_type: Some(CallType::NotUnderContract),
                error_details: None,
                related_machine_ids: None,
            },
            zone: Some(ZoneSelection::Zone(1)),
            customer_id: Some(10),
            contact_id: Some(100),
            asset_id: Some(55),
        }
    }

    #[test]
    fn test_complete_draft_is_valid() {
        assert!(complete_draft().validate().is_ok());
    }

    #[test]
    fn test_missing_asset_blocks_submit() {
        let mut draft = complete_draft();
        draft.asset_id = None;
        let errors = draft.validate().unwrap_err();
        assert_eq!(validation_messages(&errors), vec!["Please select an asset"]);
    }

    #[test]
    fn test_nested_details_are_validated() {
        let mut draft = complete_draft();
        draft.details.title = "ab".into();
        draft.details.call_type = None;
        let errors = draft.validate().unwrap_err();
        let messages = validation_messages(&errors);
        assert_eq!(
            messages,
            vec!["Call type is required", "Title must be at least 3 characters"]
        );
    }

    #[test]
    fn test_default_draft_priority() {
        let draft = TicketDraft::default();
        assert_eq!(draft.details.priority, Priority::Medium);
        assert!(draft.zone.is_none());
    }

    #[test]
    fn test_contact_form_validation() {
        let form = ContactForm {
            name: "Bob".into(),
            phone: "555-0100".into(),
            email: Some("not-an-email".into()),
        };
        let messages = validation_messages(&form.validate().unwrap_err());
        assert_eq!(messages, vec!["Invalid email address"]);

        let form = ContactForm {
            email: None,
            ..form
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_blank_text_fails_after_normalizing() {
        let mut draft = complete_draft();
        draft.details.title = "     ".into();
        draft.details.description = "  short   ".into();
        draft.details.error_details = Some("   ".into());
        assert!(draft.validate().is_ok());

        let normalized = draft.normalized();
        assert_eq!(normalized.details.error_details, None);
        let messages = validation_messages(&normalized.validate().unwrap_err());
        assert_eq!(
            messages,
            vec![
                "Description must be at least 10 characters",
                "Title must be at least 3 characters"
            ]
        );
    }

    #[test]
    fn test_blank_contact_and_asset_fields() {
        let form = ContactForm {
            name: " Carol ".into(),
            phone: "   ".into(),
            email: Some("  ".into()),
        }
        .normalized();
        assert_eq!(form.name, "Carol");
        assert_eq!(form.email, None);
        assert_eq!(
            validation_messages(&form.validate().unwrap_err()),
            vec!["Phone is required"]
        );

        let form = AssetForm {
            model: "  ".into(),
            serial_no: " SN-1 ".into(),
        }
        .normalized();
        assert_eq!(form.serial_no, "SN-1");
        assert_eq!(
            validation_messages(&form.validate().unwrap_err()),
            vec!["Model is required"]
        );
    }

    #[test]
    fn test_blank_email_is_dropped() {
        let form = ContactForm {
            name: "Carol".into(),
            phone: "555-0101".into(),
            email: Some("   ".into()),
        };
        assert!(form.validate().is_err());
        let form = form.normalized();
        assert!(form.validate().is_ok());
        assert_eq!(form.email, None);
    }

    #[test]
    fn test_inline_dialog_lifecycle() {
        let mut dialog: InlineDialog<AssetForm> = InlineDialog::default();
        dialog.show();
        assert!(dialog.open);

        let form = AssetForm {
            model: "X200".into(),
            serial_no: "SN-1".into(),
        };
        dialog.keep(form.clone());
        assert!(dialog.open);
        assert_eq!(dialog.form, form);

        dialog.close_and_reset();
        assert!(!dialog.open);
        assert_eq!(dialog.form, AssetForm::default());
    }
}
