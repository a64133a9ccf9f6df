//! Client configuration: where the gateway's admin interface lives.

/// Address of the gateway admin API. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    host_address: String,
}

/// Environment variable consulted by [`Config::from_env`].
pub const ADMIN_ADDR_ENV: &str = "GATEWAY_ADMIN_ADDR";

/// Admin address used when `GATEWAY_ADMIN_ADDR` is unset.
pub const DEFAULT_ADMIN_ADDR: &str = "http://localhost:8001";

impl Config {
    /// A trailing slash on the address is trimmed so path concatenation
    /// never produces `//plugins/`.
    pub fn new(host_address: &str) -> Self {
        Self {
            host_address: host_address.trim_end_matches('/').to_string(),
        }
    }

    /// Read the admin address from `GATEWAY_ADMIN_ADDR`, falling back to
    /// `http://localhost:8001`.
    pub fn from_env() -> Self {
        let addr =
            std::env::var(ADMIN_ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADMIN_ADDR.to_string());
        Self::new(&addr)
    }

    /// Base URL of the admin API, without trailing slash.
    pub fn host_address(&self) -> &str {
        &self.host_address
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_ADDR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slash() {
        let config = Config::new("http://localhost:8001/");
        assert_eq!(config.host_address(), "http://localhost:8001");
    }

    #[test]
    fn new_keeps_address_without_slash() {
        let config = Config::new("http://gateway:8001");
        assert_eq!(config.host_address(), "http://gateway:8001");
    }

    #[test]
    fn default_uses_local_admin_port() {
        assert_eq!(Config::default().host_address(), "http://localhost:8001");
    }
}
