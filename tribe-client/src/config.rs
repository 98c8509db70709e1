//! Client configuration

use shared::DEFAULT_CURRENCY;

/// Client configuration for connecting to the TribeNet API
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Fixed path prefix of every endpoint
    pub api_prefix: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Currency used when creating payment orders
    pub currency: String,

    /// Merchant name shown by the checkout widget
    pub merchant_name: String,

    /// Gateway key used when the order response carries none
    pub fallback_key_id: Option<String>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_prefix: "/api/v1".to_string(),
            timeout: 30,
            currency: DEFAULT_CURRENCY.to_string(),
            merchant_name: "TribeNet".to_string(),
            fallback_key_id: None,
        }
    }

    /// Load from `TRIBE_*` environment variables, defaulting what is unset.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("TRIBE_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into()),
        );
        if let Ok(prefix) = std::env::var("TRIBE_API_PREFIX") {
            config = config.with_api_prefix(prefix);
        }
        if let Some(timeout) = std::env::var("TRIBE_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config = config.with_timeout(timeout);
        }
        if let Ok(currency) = std::env::var("TRIBE_CURRENCY")
            && !currency.is_empty()
        {
            config = config.with_currency(currency);
        }
        if let Ok(name) = std::env::var("TRIBE_MERCHANT_NAME")
            && !name.is_empty()
        {
            config = config.with_merchant_name(name);
        }
        if let Ok(key) = std::env::var("TRIBE_CHECKOUT_KEY_ID")
            && !key.is_empty()
        {
            config = config.with_fallback_key_id(key);
        }
        config
    }

    /// Set the API prefix
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the order currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the merchant display name
    pub fn with_merchant_name(mut self, name: impl Into<String>) -> Self {
        self.merchant_name = name.into();
        self
    }

    /// Set the fallback checkout key
    pub fn with_fallback_key_id(mut self, key: impl Into<String>) -> Self {
        self.fallback_key_id = Some(key.into());
        self
    }

    /// Full URL of an endpoint path such as `/clubs/3`.
    pub fn endpoint_url(&self, path: &str) -> String {
        let prefix = self.api_prefix.trim_matches('/');
        let path = path.trim_start_matches('/');
        let base = self.base_url.trim_end_matches('/');
        if prefix.is_empty() {
            format!("{base}/{path}")
        } else {
            format!("{base}/{prefix}/{path}")
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_prefix() {
        let config = ClientConfig::new("http://localhost:8080/");
        assert_eq!(
            config.endpoint_url("/clubs/3/members"),
            "http://localhost:8080/api/v1/clubs/3/members"
        );
    }

    #[test]
    fn test_endpoint_url_without_prefix() {
        let config = ClientConfig::new("http://api.test").with_api_prefix("");
        assert_eq!(config.endpoint_url("clubs"), "http://api.test/clubs");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.currency, "INR");
        assert_eq!(config.merchant_name, "TribeNet");
        assert_eq!(config.timeout, 30);
    }
}
