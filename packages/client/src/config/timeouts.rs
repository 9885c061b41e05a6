//! Timeout configuration methods

use std::time::Duration;

use super::core::CacheConfig;

impl CacheConfig {
    /// Set the connection timeout
    ///
    /// Bounds how long the TCP handshake with the origin may take. Each
    /// resolved address gets the full timeout.
    ///
    /// # Examples
    /// ```no_run
    /// use std::time::Duration;
    /// use urlcache_client::config::CacheConfig;
    ///
    /// let config = CacheConfig::default()
    ///     .with_connect_timeout(Duration::from_secs(5));
    /// assert_eq!(config.connect_timeout, Duration::from_secs(5));
    /// ```
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the read timeout
    ///
    /// Applies to every individual read on the socket, not to the whole
    /// response.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the write timeout
    #[must_use]
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Set connect, read and write timeouts to the same value
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_connect_timeout(timeout)
            .with_read_timeout(timeout)
            .with_write_timeout(timeout)
    }
}
