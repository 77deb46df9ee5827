//! Daum Books metadata provider (Kakao book search API).
//!
//! API documentation: https://developers.kakao.com/docs/latest/ko/daum-search/dev-guide

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

use crate::config::DaumConfig;
use crate::error::{ConfigError, LookupError};
use crate::language::{LanguageNames, StaticLanguageNames};
use crate::lookup::{LookupOptions, MetadataProvider};
use crate::record::{MetaRecord, MetaSourceInfo};
use crate::tokenize::{DefaultTitleTokenizer, TitleTokenizer};

pub const PROVIDER_ID: &str = "daum";
pub const DESCRIPTION: &str = "Daum Books";
pub const META_URL: &str = "https://search.daum.net/search?w=bookpage";
/// The encoded query is appended directly to this URL.
pub const DEFAULT_SEARCH_URL: &str = "https://dapi.kakao.com/v3/search/book?target=title&query=";

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

// Seconds always carry a 1-6 digit fraction; the offset is numeric or `Z`.
static DATETIME_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,6}([+-]\d{2}:?\d{2}|Z)$").unwrap()
});

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    documents: Vec<DaumDocument>,
}

/// One entry of the `documents` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DaumDocument {
    /// Space-separated `"<isbn10> <isbn13>"`; either part may be missing.
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub contents: Option<String>,
    pub publisher: Option<String>,
    pub datetime: Option<String>,
}

pub struct DaumProvider {
    api_key: String,
    search_url: String,
    active: bool,
    source: MetaSourceInfo,
    client: reqwest::blocking::Client,
    tokenizer: Box<dyn TitleTokenizer>,
    languages: Box<dyn LanguageNames>,
}

impl DaumProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_search_url(api_key, DEFAULT_SEARCH_URL)
    }

    pub fn with_search_url(api_key: impl Into<String>, search_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            search_url: search_url.into(),
            active: true,
            source: MetaSourceInfo {
                id: PROVIDER_ID.to_string(),
                description: DESCRIPTION.to_string(),
                link: META_URL.to_string(),
            },
            client: reqwest::blocking::Client::new(),
            tokenizer: Box::new(DefaultTitleTokenizer),
            languages: Box::new(StaticLanguageNames),
        }
    }

    /// Build the provider from the `[daum]` config section. The API key is required.
    pub fn from_config(config: &DaumConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            })?;
        let mut provider = Self::with_search_url(api_key, config.search_url.clone());
        provider.set_status(config.active);
        Ok(provider)
    }

    pub fn with_tokenizer(mut self, tokenizer: impl TitleTokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    pub fn with_language_names(mut self, languages: impl LanguageNames + 'static) -> Self {
        self.languages = Box::new(languages);
        self
    }

    /// Run one search request, reporting failures instead of logging them.
    ///
    /// Items missing a title or link are skipped with a warning; the rest keep
    /// their response order.
    pub fn try_search(
        &self,
        query: &str,
        options: &LookupOptions,
    ) -> Result<Vec<MetaRecord>, LookupError> {
        let url = format!("{}{}", self.search_url, build_query(self.tokenizer.as_ref(), query));
        tracing::debug!(provider = PROVIDER_ID, %url, "Searching");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("KakaoAK {}", self.api_key))
            .send()
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        let body: SearchResponse = response.json().map_err(|e| LookupError::Decode {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })?;

        let mut records = Vec::with_capacity(body.documents.len());
        for document in &body.documents {
            match self.parse_search_result(document, options) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(provider = PROVIDER_ID, "Skipping search result: {}", e),
            }
        }
        Ok(records)
    }

    /// Map one API document to a record.
    pub fn parse_search_result(
        &self,
        document: &DaumDocument,
        options: &LookupOptions,
    ) -> Result<MetaRecord, LookupError> {
        let title = document.title.clone().ok_or_else(|| missing_field("title"))?;
        let url = document.url.clone().ok_or_else(|| missing_field("url"))?;
        let isbn_13 = isbn_13(document.isbn.as_deref().unwrap_or(""));

        let mut record = MetaRecord::new(
            isbn_13.clone(),
            title,
            document.authors.clone().unwrap_or_default(),
            url,
            self.source.clone(),
        );
        record.cover = document
            .thumbnail
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| options.generic_cover.clone());
        record.description = document.contents.clone().unwrap_or_default();
        record.languages = self.languages_for(&options.locale);
        record.publisher = document.publisher.clone().unwrap_or_default();
        record.published_date = parse_published_date(document.datetime.as_deref().unwrap_or(""));
        record.identifiers = BTreeMap::from([
            (PROVIDER_ID.to_string(), isbn_13.clone()),
            ("isbn".to_string(), isbn_13),
        ]);
        Ok(record)
    }

    // Daum lists Korean books; the API carries no language field.
    fn languages_for(&self, locale: &str) -> Vec<String> {
        let korean = self.languages.lang3("ko").unwrap_or("kor");
        vec![self.languages.display_name(locale, korean)]
    }
}

impl MetadataProvider for DaumProvider {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn source_info(&self) -> &MetaSourceInfo {
        &self.source
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_status(&mut self, active: bool) {
        self.active = active;
    }

    fn search(&self, query: &str, options: &LookupOptions) -> Option<Vec<MetaRecord>> {
        if !self.active {
            return Some(Vec::new());
        }
        match self.try_search(query, options) {
            Ok(records) => Some(records),
            Err(e) => {
                tracing::warn!(provider = PROVIDER_ID, "Search failed: {}", e);
                None
            }
        }
    }
}

impl fmt::Debug for DaumProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DaumProvider")
            .field("search_url", &self.search_url)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

fn missing_field(field: &'static str) -> LookupError {
    LookupError::MissingField {
        provider: PROVIDER_ID.to_string(),
        field,
    }
}

/// Percent-encode each title token and join with `+`. A query without tokens
/// is passed through untouched.
pub fn build_query(tokenizer: &dyn TitleTokenizer, query: &str) -> String {
    let tokens = tokenizer.tokens(query, false);
    if tokens.is_empty() {
        return query.to_string();
    }
    tokens
        .iter()
        .map(|t| urlencoding::encode(t))
        .collect::<Vec<_>>()
        .join("+")
}

/// Second token of the space-separated ISBN field, or empty.
pub fn isbn_13(raw: &str) -> String {
    raw.split_whitespace().nth(1).unwrap_or("").to_string()
}

/// `YYYY-MM-DD` from an API timestamp such as `2014-11-17T00:00:00.000+09:00`.
/// Anything unparsable becomes an empty string.
pub fn parse_published_date(raw: &str) -> String {
    if !DATETIME_SHAPE.is_match(raw) {
        tracing::debug!(provider = PROVIDER_ID, "Unparsable datetime {:?}", raw);
        return String::new();
    }
    let normalized = match raw.strip_suffix('Z') {
        Some(rest) => format!("{}+0000", rest),
        None => raw.to_string(),
    };
    match DateTime::parse_from_str(&normalized, DATETIME_FORMAT) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(e) => {
            tracing::debug!(provider = PROVIDER_ID, "Unparsable datetime {:?}: {}", raw, e);
            String::new()
        }
    }
}
