//! Settings of the default hyper transport.
//!
//! They only matter when no custom base transport is given to the
//! [`ClientBuilder`](crate::ClientBuilder).

use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POOL_IDLE_PER_HOST: usize = 32;
const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Default transport settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline for a response to arrive, maps to [`Error::Timeout`](crate::Error::Timeout).
    pub timeout: Duration,
    /// Deadline for establishing a connection.
    pub connect_timeout: Duration,
    /// Idle connections kept per host.
    pub pool_idle_per_host: usize,
    /// How long an idle connection stays pooled.
    pub pool_idle_timeout: Duration,
    /// `User-Agent` sent when a request carries none.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_idle_per_host: DEFAULT_POOL_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Start from the defaults.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`], starting from its defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the response deadline.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection deadline.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set how many idle connections are kept per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config.pool_idle_per_host = count;
        self
    }

    /// Set how long idle connections stay pooled.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set the fallback `User-Agent`.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(agent.into());
        self
    }

    /// Finish the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_idle_per_host, 32);
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(90));
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn builder_keeps_unset_defaults() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(60))
            .pool_idle_per_host(16)
            .user_agent("trip-tests/1.0")
            .build();

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.pool_idle_per_host, 16);
        assert_eq!(config.pool_idle_timeout, DEFAULT_POOL_IDLE_TIMEOUT);
        assert_eq!(config.user_agent.as_deref(), Some("trip-tests/1.0"));
    }
}
