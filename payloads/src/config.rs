use std::time::Duration;

/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8000";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the backend, without the `/api` prefix.
    pub address: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the configuration from the environment.
    ///
    /// Variables can be set directly or loaded from a .env file:
    /// - BACKEND_URL: backend origin (defaults to http://127.0.0.1:8000)
    /// - BACKEND_TIMEOUT_SECS: request timeout in seconds (defaults to 30)
    pub fn from_env() -> Self {
        // a missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(address) = lookup("BACKEND_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
        {
            config.address = address;
        }
        match lookup("BACKEND_TIMEOUT_SECS").map(|s| s.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => {
                config.timeout = Duration::from_secs(secs)
            }
            Some(_) => tracing::warn!(
                "Ignoring invalid BACKEND_TIMEOUT_SECS, using {}s",
                DEFAULT_TIMEOUT.as_secs()
            ),
            None => {}
        }
        config
    }
}
