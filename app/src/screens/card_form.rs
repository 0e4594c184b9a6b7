//! Card form state with field-level validation for inline display.

use serde::Serialize;

use vd_core::domain::entities::CardFormInput;
use vd_shared::utils::card;

/// One inline validation message, keyed by form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// The card form as the user fills it in
#[derive(Debug, Clone, Default)]
pub struct CardFormState {
    pub number: String,
    pub expiry: String,
    pub cvc: String,
    pub holder_name: String,
}

impl CardFormState {
    /// Validate every field, collecting all inline errors at once.
    ///
    /// Unlike the submission path (which stops at the first problem), the
    /// form reports everything so the UI can mark each field.
    pub fn validate(&self) -> Result<CardFormInput, Vec<FieldError>> {
        let mut errors = Vec::new();

        let number = card::normalize_card_number(&self.number);
        if !card::is_valid_card_number(&number) {
            errors.push(FieldError::new("number", "Enter a valid card number"));
        }

        match card::parse_expiry(&self.expiry) {
            None => errors.push(FieldError::new("expiry", "Use MM/YY")),
            Some((month, year)) => {
                if card::is_expiry_in_past(month, year) {
                    errors.push(FieldError::new("expiry", "Card has expired"));
                }
            }
        }

        if !card::is_valid_cvc(&self.cvc) {
            errors.push(FieldError::new("cvc", "3 or 4 digits"));
        }

        if self.holder_name.trim().is_empty() {
            errors.push(FieldError::new("holder_name", "Name is required"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CardFormInput {
            number: self.number.clone(),
            expiry: self.expiry.clone(),
            cvc: self.cvc.clone(),
            holder_name: self.holder_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> CardFormState {
        CardFormState {
            number: String::from("4242 4242 4242 4242"),
            expiry: String::from("12/30"),
            cvc: String::from("123"),
            holder_name: String::from("Ada Lovelace"),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(filled_form().validate().is_ok());
    }

    #[test]
    fn test_all_errors_collected_at_once() {
        let form = CardFormState::default();
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["number", "expiry", "cvc", "holder_name"]);
    }

    #[test]
    fn test_expired_card_flagged_on_the_expiry_field() {
        let form = CardFormState {
            expiry: String::from("01/21"),
            ..filled_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors, vec![FieldError::new("expiry", "Card has expired")]);
    }
}
