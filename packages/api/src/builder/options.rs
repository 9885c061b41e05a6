//! Transport and framing options

use std::time::Duration;

use urlcache_client::MissingContentLength;

use super::core::UrlCacheBuilder;

impl UrlCacheBuilder {
    /// Bound the TCP handshake with the origin
    ///
    /// # Examples
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// let cache = urlcache::builder()
    ///     .cache_dir("/tmp/urlcache")
    ///     .connect_timeout(Duration::from_secs(2))
    ///     .open()?;
    /// # let _ = cache;
    /// # Ok::<(), urlcache::Error>(())
    /// ```
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_connect_timeout(timeout);
        self
    }

    /// Bound every individual socket read
    #[must_use]
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_read_timeout(timeout);
        self
    }

    /// Bound every individual socket write
    #[must_use]
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_write_timeout(timeout);
        self
    }

    /// Use one timeout for connect, read and write
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Cap the response header block
    #[must_use]
    pub fn max_header_bytes(mut self, limit: usize) -> Self {
        self.config = self.config.with_max_header_bytes(limit);
        self
    }

    /// Store an empty body instead of failing when `Content-Length` is absent
    #[must_use]
    pub fn lenient_content_length(mut self) -> Self {
        self.config = self
            .config
            .with_missing_content_length(MissingContentLength::TreatAsEmpty);
        self
    }

    /// Send a `User-Agent` header with every request
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(user_agent);
        self
    }
}
