//! Fallback values applied when optional variables are unset.

/// Default HTTP bind address.
pub(crate) const BIND_ADDR: &str = "127.0.0.1";
/// Default HTTP listener port.
pub(crate) const HTTP_PORT: u16 = 7080;
/// Default logging filter when `RUST_LOG` is not provided.
pub(crate) const LOG_LEVEL: &str = "info";
/// Default issue store API base URL.
pub(crate) const STORE_API_BASE: &str = "https://api.github.com";
/// Default per-request timeout for store calls, in seconds.
pub(crate) const STORE_TIMEOUT_SECS: u64 = 10;
/// `User-Agent` sent with every store request.
pub(crate) const STORE_USER_AGENT: &str = "linkboard/0.1";
