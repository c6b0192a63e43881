use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier of a property.
///
/// The API hands out numeric ids, but some deployments serialize them as
/// strings, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyId::Number(n) => write!(f, "{}", n),
            PropertyId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PropertyId {
    fn from(value: i64) -> Self {
        PropertyId::Number(value)
    }
}

/// A property listing as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub address: String,
    pub price: f64,
    pub size: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl Property {
    /// Body to send back when saving this record
    pub fn to_input(&self) -> PropertyInput {
        PropertyInput {
            address: self.address.clone(),
            price: self.price,
            size: self.size,
            description: self.description.clone(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Create/update payload. Never carries the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    pub address: String,
    pub price: f64,
    pub size: f64,
    pub description: String,
}

/// Pagination state of the listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    /// Zero-based index of the page on screen
    pub page: u32,
    /// Records per page
    pub size: u32,
    /// Spring-style sort expression, e.g. `id,desc`
    pub sort: String,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 0,
            size: 5,
            sort: "id,desc".to_string(),
            total_pages: 1,
            total_elements: 0,
        }
    }
}

impl PageState {
    /// Clamp a requested page index into `[0, total_pages - 1]`.
    ///
    /// An empty result set reports zero pages; that still resolves to page 0.
    pub fn clamp(&self, requested: i64) -> u32 {
        let last = i64::from(self.total_pages) - 1;
        requested.min(last).max(0) as u32
    }

    pub fn is_last_page(&self) -> bool {
        self.page + 1 >= self.total_pages
    }
}

/// Optional search filters sent with every list request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<String>,
}

impl Filters {
    /// Query-string pairs for the filters that are set, in a stable order
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("q", &self.q),
            ("address", &self.address),
            ("minPrice", &self.min_price),
            ("maxPrice", &self.max_price),
            ("minSize", &self.min_size),
            ("maxSize", &self.max_size),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone())))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }
}
