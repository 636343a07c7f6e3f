//! Resolution of `{field}` bindings against a [`DataRecord`].

use crate::record::{DataRecord, Value};
use std::collections::BTreeSet;

/// Field names rendered as money when no explicit set is configured.
pub const DEFAULT_CURRENCY_FIELDS: [&str; 3] = ["unit_price", "total", "amount"];

/// Turns field bindings into display text.
///
/// Which keys hold money is configuration, not guesswork: a key is a currency
/// field when its last dotted segment (`line_items.0.total` → `total`) is in
/// `currency_fields`. Numbers bound to such keys render with exactly
/// `currency_decimals` decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResolver {
    currency_fields: BTreeSet<String>,
    currency_decimals: usize,
}

impl Default for FieldResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_FIELDS, 2)
    }
}

impl FieldResolver {
    pub fn new<I, S>(currency_fields: I, currency_decimals: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            currency_fields: currency_fields.into_iter().map(Into::into).collect(),
            currency_decimals,
        }
    }

    pub fn currency_fields(&self) -> impl Iterator<Item = &str> {
        self.currency_fields.iter().map(String::as_str)
    }

    pub fn is_currency_field(&self, key: &str) -> bool {
        let leaf = key.rsplit('.').next().unwrap_or(key);
        self.currency_fields.contains(leaf)
    }

    /// Looks up `field_name` (with `{}` decoration removed) in `record`.
    /// Returns `fallback` unchanged when the key is absent.
    pub fn resolve(&self, field_name: &str, record: &DataRecord, fallback: &str) -> String {
        let key = strip_decoration(field_name);
        match record.get(key) {
            Some(value) => self.display(key, value),
            None => {
                log::trace!("Field '{}' not in record, using fallback", key);
                fallback.to_string()
            }
        }
    }

    /// Display text for `value` stored under `key`.
    pub fn display(&self, key: &str, value: &Value) -> String {
        match value {
            Value::Number(n) if n.is_finite() && self.is_currency_field(key) => {
                format_fixed(*n, self.currency_decimals)
            }
            other => other.to_string(),
        }
    }
}

/// Resolves with the default currency fields.
pub fn resolve(field_name: &str, record: &DataRecord, fallback: &str) -> String {
    FieldResolver::default().resolve(field_name, record, fallback)
}

/// Removes surrounding `{`/`}` and whitespace: `"{ total }"` → `"total"`.
pub fn strip_decoration(field_name: &str) -> &str {
    field_name
        .trim()
        .trim_matches(|c| c == '{' || c == '}')
        .trim()
}

/// Fixed-point formatting with ties rounded away from zero, decided on the
/// exact decimal value of `n` (`0.125` → `0.13`, `1.005` → `1.00`).
fn format_fixed(n: f64, decimals: usize) -> String {
    // 40 extra digits separate an exact tie from the nearest non-tie double.
    let exact = format!("{:.*}", decimals + 40, n.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .map(|b| b - b'0')
        .collect();
    let mut int_len = int_part.len();

    if frac_part.as_bytes().get(decimals).is_some_and(|&b| b >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
            int_len += 1;
        }
    }

    let mut out = String::with_capacity(digits.len() + 2);
    // -0.001 rounds to zero and loses its sign
    if n.is_sign_negative() && digits.iter().any(|&d| d != 0) {
        out.push('-');
    }
    for (i, d) in digits.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(b'0' + d));
    }
    out
}
