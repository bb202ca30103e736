//! Internal helpers.
//!
//! These utilities are **not** part of the public API.

/// Formats an amount in minor units as a decimal string, e.g. `5500` ->
/// `"55.00"`. Used for notification messages only.
pub(crate) fn fmt_amount(amount_minor: i64) -> String {
    let sign = if amount_minor < 0 { "-" } else { "" };
    let abs = amount_minor.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
