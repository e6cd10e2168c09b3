//! Client configuration

use std::time::Duration;

use zenkeo_core::constants::{DEFAULT_PORT, DEFAULT_READ_TIMEOUT, DEFAULT_TIMEOUT};

/// How a response is collected after a frame is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadStrategy {
    /// One bounded read; whatever arrives is the response
    #[default]
    Single,

    /// For state-bearing commands, keep reading until a full state body is
    /// buffered or the read timeout expires
    UntilComplete,
}

/// Connection settings for one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,

    /// MAC address as resolved by the caller, any common notation
    pub mac: String,

    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub read_strategy: ReadStrategy,
}

impl ClientConfig {
    /// Create a configuration with default port and timeouts
    pub fn new(host: impl Into<String>, mac: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            mac: mac.into(),
            connect_timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT),
            read_strategy: ReadStrategy::default(),
        }
    }

    /// Set device port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set how responses are collected
    pub fn with_read_strategy(mut self, strategy: ReadStrategy) -> Self {
        self.read_strategy = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("192.168.1.50", "AA:BB:CC:DD:EE:FF");

        assert_eq!(config.port, 56800);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.read_strategy, ReadStrategy::Single);
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("ac.local", "aabbccddeeff")
            .with_port(9000)
            .with_connect_timeout(Duration::from_millis(250))
            .with_read_timeout(Duration::from_secs(2))
            .with_read_strategy(ReadStrategy::UntilComplete);

        assert_eq!(config.port, 9000);
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
        assert_eq!(config.read_timeout, Duration::from_secs(2));
        assert_eq!(config.read_strategy, ReadStrategy::UntilComplete);
    }
}
