/// Failures while querying a metadata provider.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider {provider} answered with HTTP status {status}")]
    Status { provider: String, status: u16 },

    #[error("Provider {provider} returned an unreadable response: {message}")]
    Decode { provider: String, message: String },

    #[error("Provider {provider} returned an item without required field `{field}`")]
    MissingField {
        provider: String,
        field: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No API key configured for provider {provider}")]
    MissingApiKey { provider: String },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
