//! Card field validation and normalization helpers
//!
//! Pure functions over form input. Error mapping to the domain taxonomy
//! happens in `vd_core`; these helpers only answer yes/no and reshape
//! values for the wire.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static CARD_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{13,19}$").expect("valid card number regex"));

static EXPIRY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("valid expiry regex"));

static CVC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3,4}$").expect("valid cvc regex"));

/// Strip the spaces users type between card number groups
pub fn normalize_card_number(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check a card number after normalization: 13 to 19 digits
pub fn is_valid_card_number(normalized: &str) -> bool {
    CARD_NUMBER_PATTERN.is_match(normalized)
}

/// Parse an `MM/YY` expiry string into (month, two-digit year)
pub fn parse_expiry(input: &str) -> Option<(u32, u32)> {
    let captures = EXPIRY_PATTERN.captures(input.trim())?;
    let month = captures[1].parse().ok()?;
    let year = captures[2].parse().ok()?;
    Some((month, year))
}

/// Check whether an expiry month/year is already in the past.
///
/// Two-digit years are interpreted as 2000 + YY. A card is usable through
/// the last day of its expiry month.
pub fn is_expiry_in_past(month: u32, two_digit_year: u32) -> bool {
    let now = Utc::now();
    let expiry_year = 2000 + two_digit_year as i32;
    let current = (now.year(), now.month());
    (expiry_year, month) < current
}

/// Reformat an expiry pair into the gateway's `MMYY` wire form
pub fn wire_expiry(month: u32, two_digit_year: u32) -> String {
    format!("{:02}{:02}", month, two_digit_year)
}

/// Check a CVC/CVV value: 3 or 4 digits
pub fn is_valid_cvc(input: &str) -> bool {
    CVC_PATTERN.is_match(input.trim())
}

/// Mask a card number for logging, keeping only the last four digits
pub fn mask_card_number(number: &str) -> String {
    let normalized = normalize_card_number(number);
    if normalized.len() < 4 {
        return String::from("****");
    }
    format!("**** {}", &normalized[normalized.len() - 4..])
}
