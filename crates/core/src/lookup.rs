//! Metadata lookup via pluggable providers (Daum Books).

pub mod daum;

use crate::record::{MetaRecord, MetaSourceInfo};

pub trait MetadataProvider: Send + Sync {
    /// Short stable id, used as the identifier key on records.
    fn id(&self) -> &str;
    fn description(&self) -> &str;
    /// Descriptor attached to every record this provider returns.
    fn source_info(&self) -> &MetaSourceInfo;
    fn is_active(&self) -> bool;
    fn set_status(&mut self, active: bool);

    /// Search for candidate matches.
    ///
    /// Returns `Some(vec![])` without touching the network when the provider is
    /// inactive, and `None` when the provider could not be reached or refused
    /// the request.
    fn search(&self, query: &str, options: &LookupOptions) -> Option<Vec<MetaRecord>>;
}

/// Per-search presentation options supplied by the caller.
#[derive(Debug, Clone)]
pub struct LookupOptions {
    /// Placeholder cover for results without a thumbnail.
    pub generic_cover: String,
    /// Locale used for language display names.
    pub locale: String,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            generic_cover: String::new(),
            locale: "en".to_string(),
        }
    }
}
