//! Price string normalization
//!
//! Display prices arrive as strings ("$19.99", "19,99 €", "19.99"). The
//! gateway wants a plain positive number; anything that does not cleanly
//! parse to one is rejected before a request is built.

/// Strip currency symbols, separators and whitespace from a display price
pub fn clean_amount_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Parse a display price into a positive amount.
///
/// Returns `None` when the cleaned string does not parse, or parses to a
/// non-finite or non-positive number.
pub fn parse_positive_amount(input: &str) -> Option<f64> {
    let cleaned = clean_amount_string(input);
    let value: f64 = cleaned.parse().ok()?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}
