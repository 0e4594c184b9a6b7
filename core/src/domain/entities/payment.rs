//! Payment entities: requests, statuses, card details.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use vd_shared::utils::card;

/// Status of a payment request as reported by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    /// Anything the gateway reports that we do not model
    Unknown(String),
}

impl PaymentStatus {
    /// Parse the gateway's status string; the gateway is not consistent
    /// about casing, so this is the single place raw values are mapped.
    pub fn from_raw(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" => PaymentStatus::Pending,
            "processing" | "in_progress" => PaymentStatus::Processing,
            "completed" | "success" | "succeeded" => PaymentStatus::Completed,
            "failed" | "declined" => PaymentStatus::Failed,
            "cancelled" | "canceled" => PaymentStatus::Cancelled,
            _ => PaymentStatus::Unknown(raw.to_string()),
        }
    }

    /// Terminal statuses will never change again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Completed | PaymentStatus::Failed | PaymentStatus::Cancelled
        )
    }

    /// The raw-ish label used in error messages
    pub fn label(&self) -> &str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Unknown(raw) => raw,
        }
    }
}

/// Payment method selected on the payment screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethodType {
    Card,
    Wallet,
}

impl PaymentMethodType {
    /// Wire value expected by the gateway
    pub fn as_wire(&self) -> &'static str {
        match self {
            PaymentMethodType::Card => "CARD",
            PaymentMethodType::Wallet => "WALLET",
        }
    }

    /// Parse the gateway's method string, tolerating either casing
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "CARD" => Some(PaymentMethodType::Card),
            "WALLET" => Some(PaymentMethodType::Wallet),
            _ => None,
        }
    }
}

/// A server-side payment request record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Opaque gateway-issued identifier
    pub id: String,

    /// Charge amount
    pub amount: f64,

    /// Currency code
    pub currency: String,

    /// Payment method
    pub method_type: PaymentMethodType,

    /// Last observed status
    pub status: PaymentStatus,

    /// Gateway result code accompanying terminal statuses, when supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_code: Option<String>,
}

/// What a payment pays for; decides which confirmation endpoint runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseKind {
    Plan { plan_id: String },
    Addon { addon_id: String },
}

impl PurchaseKind {
    pub fn plan(plan_id: impl Into<String>) -> Self {
        PurchaseKind::Plan { plan_id: plan_id.into() }
    }

    pub fn addon(addon_id: impl Into<String>) -> Self {
        PurchaseKind::Addon { addon_id: addon_id.into() }
    }
}

/// Raw card form input as typed by the user
#[derive(Clone, Default, Debug)]
pub struct CardFormInput {
    /// Card number, possibly with grouping spaces
    pub number: String,
    /// Expiry as `MM/YY`
    pub expiry: String,
    /// Security code
    pub cvc: String,
    /// Cardholder name
    pub holder_name: String,
}

/// Validated card details, transient and never persisted
#[derive(Clone, PartialEq)]
pub struct CardDetails {
    number: String,
    expiry_month: u32,
    expiry_year: u32,
    cvc: String,
    holder_name: String,
}

impl CardDetails {
    /// Validate raw form input into usable card details.
    ///
    /// Rules: number 13-19 digits after space stripping, expiry `MM/YY` not
    /// in the past, CVC 3-4 digits, non-empty holder name. Validation
    /// failures never leave the device.
    pub fn parse(input: &CardFormInput) -> Result<Self, ValidationError> {
        let number = card::normalize_card_number(&input.number);
        if !card::is_valid_card_number(&number) {
            return Err(ValidationError::InvalidCardNumber);
        }

        let (expiry_month, expiry_year) =
            card::parse_expiry(&input.expiry).ok_or(ValidationError::InvalidExpiryFormat)?;
        if card::is_expiry_in_past(expiry_month, expiry_year) {
            return Err(ValidationError::ExpiredCard);
        }

        if !card::is_valid_cvc(&input.cvc) {
            return Err(ValidationError::InvalidCvc);
        }

        let holder_name = input.holder_name.trim();
        if holder_name.is_empty() {
            return Err(ValidationError::MissingHolderName);
        }

        Ok(Self {
            number,
            expiry_month,
            expiry_year,
            cvc: input.cvc.trim().to_string(),
            holder_name: holder_name.to_string(),
        })
    }

    /// The space-stripped number sent to the gateway
    pub fn wire_number(&self) -> &str {
        &self.number
    }

    /// Expiry in the gateway's `MMYY` form
    pub fn wire_expiry(&self) -> String {
        card::wire_expiry(self.expiry_month, self.expiry_year)
    }

    pub fn cvc(&self) -> &str {
        &self.cvc
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    /// Masked number for logging
    pub fn masked_number(&self) -> String {
        card::mask_card_number(&self.number)
    }
}

// PAN and CVC stay out of debug output
impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &self.masked_number())
            .field("expiry", &format!("{:02}/{:02}", self.expiry_month, self.expiry_year))
            .field("cvc", &"***")
            .field("holder_name", &self.holder_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> CardFormInput {
        CardFormInput {
            number: String::from("4242 4242 4242 4242"),
            expiry: String::from("12/30"),
            cvc: String::from("123"),
            holder_name: String::from("Ada Lovelace"),
        }
    }

    #[test]
    fn test_valid_card_accepted() {
        let details = CardDetails::parse(&valid_input()).unwrap();
        assert_eq!(details.wire_number(), "4242424242424242");
        assert_eq!(details.wire_expiry(), "1230");
        assert_eq!(details.holder_name(), "Ada Lovelace");
    }

    #[test]
    fn test_past_expiry_rejected() {
        let input = CardFormInput {
            expiry: String::from("12/20"),
            ..valid_input()
        };
        assert_eq!(CardDetails::parse(&input), Err(ValidationError::ExpiredCard));
    }

    #[test]
    fn test_malformed_expiry_rejected() {
        let input = CardFormInput {
            expiry: String::from("1230"),
            ..valid_input()
        };
        assert_eq!(
            CardDetails::parse(&input),
            Err(ValidationError::InvalidExpiryFormat)
        );
    }

    #[test]
    fn test_short_number_rejected() {
        let input = CardFormInput {
            number: String::from("4242 4242"),
            ..valid_input()
        };
        assert_eq!(
            CardDetails::parse(&input),
            Err(ValidationError::InvalidCardNumber)
        );
    }

    #[test]
    fn test_bad_cvc_rejected() {
        let input = CardFormInput {
            cvc: String::from("12"),
            ..valid_input()
        };
        assert_eq!(CardDetails::parse(&input), Err(ValidationError::InvalidCvc));
    }

    #[test]
    fn test_blank_holder_rejected() {
        let input = CardFormInput {
            holder_name: String::from("   "),
            ..valid_input()
        };
        assert_eq!(
            CardDetails::parse(&input),
            Err(ValidationError::MissingHolderName)
        );
    }

    #[test]
    fn test_expiry_reformatting() {
        let input = CardFormInput {
            expiry: String::from("08/27"),
            ..valid_input()
        };
        let details = CardDetails::parse(&input).unwrap();
        assert_eq!(details.wire_expiry(), "0827");
    }

    #[test]
    fn test_debug_masks_sensitive_fields() {
        let details = CardDetails::parse(&valid_input()).unwrap();
        let debug = format!("{:?}", details);
        assert!(!debug.contains("4242424242424242"));
        assert!(debug.contains("**** 4242"));
        assert!(!debug.contains("123"));
    }

    #[test]
    fn test_payment_status_from_raw() {
        assert_eq!(PaymentStatus::from_raw("COMPLETED"), PaymentStatus::Completed);
        assert_eq!(PaymentStatus::from_raw("pending"), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::from_raw("canceled"), PaymentStatus::Cancelled);
        assert_eq!(
            PaymentStatus::from_raw("weird"),
            PaymentStatus::Unknown(String::from("weird"))
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(PaymentStatus::Completed.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(PaymentStatus::Cancelled.is_terminal());
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(!PaymentStatus::Processing.is_terminal());
    }

    #[test]
    fn test_method_wire_values() {
        assert_eq!(PaymentMethodType::Card.as_wire(), "CARD");
        assert_eq!(PaymentMethodType::Wallet.as_wire(), "WALLET");
        assert_eq!(PaymentMethodType::from_raw("card"), Some(PaymentMethodType::Card));
        assert_eq!(PaymentMethodType::from_raw("WALLET"), Some(PaymentMethodType::Wallet));
        assert_eq!(PaymentMethodType::from_raw("crypto"), None);
    }
}
