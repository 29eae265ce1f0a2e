// Core types: Record, Listing, DisplayImage, errors
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// One listing as delivered by the spreadsheet API. Keys are column headers
/// and keep their delivered order.
pub type Record = Map<String, Value>;

#[derive(Debug, Deserialize)]
pub struct ListingsResponse {
    #[serde(default)]
    pub listings: Value,
}

impl ListingsResponse {
    /// Records carried by the response; anything but an array of objects is dropped.
    pub fn into_records(self) -> Vec<Record> {
        match self.listings {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(record) => Some(record),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayImage {
    pub primary: String,
    pub fallback: String,
}

/// Derived, display-ready fields of a single record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub title: String,
    pub offer_type: String,
    pub type_label: String,
    pub status: String,
    pub description: String,
    pub price: String,
    pub summary: String,
    pub address: String,
    pub contact_name: String,
    pub whatsapp: String,
    pub mailto: String,
    pub images: Vec<DisplayImage>,
}

impl Listing {
    pub fn hero_image(&self) -> Option<&DisplayImage> {
        self.images.first()
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Http(String),
    #[error("API responded with status {0}")]
    Status(u16),
    #[error("no response within the deadline")]
    Timeout,
    #[error("malformed listings payload: {0}")]
    Decode(String),
    #[error("malformed callback wrapper: {0}")]
    Jsonp(String),
}

impl FetchError {
    /// Message shown to the user in place of the listings status line.
    pub fn status_message(&self) -> String {
        match self {
            FetchError::Timeout => "Could not load the listings: the API did not answer in time.".into(),
            _ => "Could not load the listings.".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
