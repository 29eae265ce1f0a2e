// Photo references: drive share links to direct image URLs, plus a proxied fallback.
use crate::model::{DisplayImage, Record};
use crate::resolver::{fields, resolve, value_text};
use crate::utils::encode_uri_component;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

pub const DIRECT_IMAGE_BASE: &str = "https://lh3.googleusercontent.com/d/";

/// Share-link shapes, tried in order: path style, `open?id=`, any `id=` parameter.
static DRIVE_ID_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"drive\.google\.com/file/d/([A-Za-z0-9_-]+)").expect("valid regex"),
        Regex::new(r"drive\.google\.com/open\?id=([A-Za-z0-9_-]+)").expect("valid regex"),
        Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").expect("valid regex"),
    ]
});

static ENTRY_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\n,]+").expect("valid regex"));

pub fn extract_drive_id(url: &str) -> Option<&str> {
    DRIVE_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Directly embeddable form of `raw`; empty input gives an empty string.
pub fn to_direct_url(raw: &str) -> String {
    let url = raw.trim();
    if url.is_empty() {
        return String::new();
    }
    if let Some(id) = extract_drive_id(url) {
        return format!("{}{}", DIRECT_IMAGE_BASE, id);
    }
    // Already a direct image host URL, or something unrecognized: pass through.
    url.to_string()
}

pub fn proxy_url(proxy_base: &str, target: &str) -> String {
    format!("{}{}", proxy_base, encode_uri_component(target))
}

/// Primary and fallback URL for one reference, or `None` when there is nothing to show.
pub fn to_display_url(raw: &str, proxy_base: &str) -> Option<DisplayImage> {
    let primary = to_direct_url(raw);
    if primary.is_empty() {
        return None;
    }
    let fallback = proxy_url(proxy_base, &primary);
    Some(DisplayImage { primary, fallback })
}

/// Splits a comma/newline separated blob and normalizes each entry in order.
pub fn split_images(blob: &str, proxy_base: &str) -> Vec<DisplayImage> {
    ENTRY_SEPARATOR
        .split(blob)
        .filter_map(|piece| to_display_url(piece, proxy_base))
        .collect()
}

pub fn normalize_list<'a, I>(entries: I, proxy_base: &str) -> Vec<DisplayImage>
where
    I: IntoIterator<Item = &'a str>,
{
    entries
        .into_iter()
        .filter_map(|entry| to_display_url(entry, proxy_base))
        .collect()
}

/// Photos of a record: a pre-parsed `imagenes` array if present, otherwise the photos column.
pub fn images_from_record(record: &Record, proxy_base: &str) -> Vec<DisplayImage> {
    if let Some(Value::Array(items)) = record.get("imagenes") {
        if !items.is_empty() {
            let texts: Vec<String> = items.iter().map(value_text).collect();
            return normalize_list(texts.iter().map(String::as_str), proxy_base);
        }
    }
    split_images(&resolve(record, &fields::PHOTOS), proxy_base)
}
