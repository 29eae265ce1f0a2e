// Display formatting helpers
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Characters left as-is by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Trimmed, lower-cased form used for comparisons.
pub fn norm(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Normalized value with its first letter upper-cased.
pub fn type_label(raw: &str) -> String {
    let normalized = norm(raw);
    let mut chars = normalized.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn currency_code(currency: &str, default_currency: &str) -> String {
    let code = currency.trim().to_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        code
    } else {
        default_currency.trim().to_uppercase()
    }
}

/// es-ES symbol; codes without a local symbol are printed as-is.
fn currency_symbol(code: &str) -> &str {
    match code {
        "EUR" => "€",
        "USD" => "US$",
        _ => code,
    }
}

/// ISO 4217 minor units; everything not listed uses two.
fn minor_digits(code: &str) -> u32 {
    match code {
        "JPY" | "KRW" | "CLP" | "ISK" | "VND" | "PYG" | "UGX" | "XAF" | "XOF" => 0,
        _ => 2,
    }
}

fn parse_amount(text: &str) -> Option<Decimal> {
    if let Ok(amount) = Decimal::from_str(text) {
        return Some(amount);
    }
    let n = text.parse::<f64>().ok().filter(|n| n.is_finite())?;
    Decimal::from_f64(n)
}

/// Groups thousands with `.`; like es-ES, four-digit amounts stay ungrouped.
fn group_thousands(digits: &str) -> String {
    if digits.len() < 5 {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Formats a loosely typed price as es-ES currency. Accepts a decimal comma;
/// anything that is not a finite number gives an empty string.
pub fn format_price(raw: &str, currency: &str, default_currency: &str) -> String {
    let text = raw.trim().replacen(',', ".", 1);
    if text.is_empty() {
        return String::new();
    }
    let Some(amount) = parse_amount(&text) else {
        return String::new();
    };

    let code = currency_code(currency, default_currency);
    let digits = minor_digits(&code);
    let rounded = amount
        .abs()
        .round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.*}", digits as usize, rounded);
    let sign = if amount.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    match fixed.split_once('.') {
        Some((int_part, frac_part)) => format!(
            "{}{},{}\u{a0}{}",
            sign,
            group_thousands(int_part),
            frac_part,
            currency_symbol(&code)
        ),
        None => format!("{}{}\u{a0}{}", sign, group_thousands(&fixed), currency_symbol(&code)),
    }
}

/// "3 hab · 2 baños · 90 m²", skipping blank parts.
pub fn room_summary(rooms: &str, bathrooms: &str, area: &str) -> String {
    let parts = [
        (rooms, "hab"),
        (bathrooms, "baños"),
        (area, "m²"),
    ];
    parts
        .iter()
        .filter(|(value, _)| !value.trim().is_empty())
        .map(|(value, unit)| format!("{} {}", value.trim(), unit))
        .collect::<Vec<_>>()
        .join(" · ")
}

pub fn whatsapp_link(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }
    format!("https://wa.me/{}", digits)
}

pub fn mailto_link(email: &str, subject: &str) -> String {
    let email = email.trim();
    if email.is_empty() {
        return String::new();
    }
    format!("mailto:{}?subject={}", email, encode_uri_component(subject))
}
