//! ensqr client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{EnsQrError, Result};

/// Configuration for the ENS name-service client and resolution pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsQrConfig {
    /// Ethereum JSON-RPC endpoint
    pub rpc_url: Url,
    /// ENS registry contract address
    pub registry_address: String,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Host suffix appended to `.eth` names to build the dWeb link
    pub dweb_gateway_suffix: String,
}

impl Default for EnsQrConfig {
    fn default() -> Self {
        Self {
            rpc_url: Url::parse(crate::DEFAULT_RPC_URL).expect("default RPC URL is valid"),
            registry_address: crate::ENS_REGISTRY_ADDRESS.to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("ensqr/{}", crate::VERSION),
            dweb_gateway_suffix: crate::DWEB_GATEWAY_SUFFIX.to_string(),
        }
    }
}

/// Builder for EnsQrConfig
pub struct EnsQrConfigBuilder {
    config: EnsQrConfig,
    error: Option<EnsQrError>,
}

impl EnsQrConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: EnsQrConfig::default(),
            error: None,
        }
    }

    /// Set the JSON-RPC endpoint URL
    pub fn rpc_url<S: AsRef<str>>(mut self, rpc_url: S) -> Self {
        match Url::parse(rpc_url.as_ref()) {
            Ok(url) => self.config.rpc_url = url,
            Err(e) => self.error = Some(e.into()),
        }
        self
    }

    /// Use a different registry deployment
    pub fn registry_address<S: Into<String>>(mut self, address: S) -> Self {
        self.config.registry_address = address.into();
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set custom user agent
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the dWeb gateway host suffix
    pub fn dweb_gateway_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.config.dweb_gateway_suffix = suffix.into();
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<EnsQrConfig> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for EnsQrConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EnsQrConfig {
    /// Create a new builder
    pub fn builder() -> EnsQrConfigBuilder {
        EnsQrConfigBuilder::new()
    }

    /// dWeb link for `name`, if the name lives under `.eth`
    pub fn dweb_link(&self, name: &str) -> Option<String> {
        let name = name.trim().to_lowercase();
        if name.ends_with(crate::ENS_TLD_SUFFIX) {
            Some(format!("https://{}{}", name, self.dweb_gateway_suffix))
        } else {
            None
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.scheme() != "https" && self.rpc_url.scheme() != "http" {
            return Err(EnsQrError::Config(format!(
                "Invalid RPC URL scheme: {}",
                self.rpc_url.scheme()
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(EnsQrError::Config("Request timeout cannot be zero".to_string()));
        }

        crate::abi::parse_address(&self.registry_address)
            .map_err(|e| EnsQrError::Config(format!("Invalid registry address: {}", e)))?;

        if !self.dweb_gateway_suffix.starts_with('.') {
            return Err(EnsQrError::Config(
                "dWeb gateway suffix must start with '.'".to_string(),
            ));
        }

        Ok(())
    }
}
