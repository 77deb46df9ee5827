//! Normalized book metadata shared by every provider.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifies the provider a record came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaSourceInfo {
    pub id: String,
    pub description: String,
    pub link: String,
}

/// One candidate match returned by a provider search.
///
/// Field names serialize in camelCase (`publishedDate`, `seriesIndex`), the
/// shape the library UI consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaRecord {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub url: String,
    pub source: MetaSourceInfo,
    pub cover: String,
    pub description: String,
    pub series: String,
    pub series_index: f32,
    pub identifiers: BTreeMap<String, String>,
    pub publisher: String,
    /// `YYYY-MM-DD`, or empty when the provider gave no usable date.
    pub published_date: String,
    pub rating: u8,
    pub languages: Vec<String>,
    pub tags: Vec<String>,
}

impl MetaRecord {
    /// A record with the required fields set and everything else empty.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        authors: Vec<String>,
        url: impl Into<String>,
        source: MetaSourceInfo,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors,
            url: url.into(),
            source,
            cover: String::new(),
            description: String::new(),
            series: String::new(),
            series_index: 1.0,
            identifiers: BTreeMap::new(),
            publisher: String::new(),
            published_date: String::new(),
            rating: 0,
            languages: Vec::new(),
            tags: Vec::new(),
        }
    }
}
