use thiserror::Error;
use url::Url;

/// Hostnames rejected outright, compared after lower-casing.
const BLOCKED_HOSTS: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0", "nda"];

/// Caller-side input problems. The `Display` text is what the API returns.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("URL parameter is required")]
    MissingUrl,

    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Only HTTP and HTTPS URLs are allowed")]
    DisallowedScheme,

    #[error("Invalid or blocked hostname")]
    BlockedHost,
}

/// Returns `true` if `host` must not be fetched.
///
/// String heuristic only: loopback aliases, anything mentioning
/// `localhost`, and bare hostnames without a dot. Resolved addresses are
/// not inspected, so a public name pointing at a private IP still passes.
pub fn is_blocked_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    BLOCKED_HOSTS.contains(&host.as_str()) || host.contains("localhost") || !host.contains('.')
}

/// An absolute http(s) URL whose host passed [`is_blocked_host`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTarget {
    url: Url,
}

impl ValidatedTarget {
    /// Validate raw caller input. Only `None` and `""` count as missing;
    /// whitespace-only input fails to parse.
    pub fn parse(raw: Option<&str>) -> Result<Self, InputError> {
        let raw = raw.filter(|s| !s.is_empty()).ok_or(InputError::MissingUrl)?;

        let url = Url::parse(raw).map_err(|_| InputError::InvalidUrl)?;

        match url.scheme() {
            "http" | "https" => {}
            _ => return Err(InputError::DisallowedScheme),
        }

        match url.host_str() {
            Some(host) if !is_blocked_host(host) => Ok(ValidatedTarget { url }),
            _ => Err(InputError::BlockedHost),
        }
    }

    /// Skips the host check. Lets tests point the resolver at a local server.
    #[cfg(test)]
    pub(crate) fn unchecked(url: Url) -> Self {
        ValidatedTarget { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}
