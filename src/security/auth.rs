//! Shared-secret request authentication.

use axum::http::{header, HeaderMap};

use crate::config::schema::SecurityConfig;

/// The key value shipped in the default config file. While the configured
/// key equals this (or is empty), authentication is not enforced: treating
/// the placeholder as "not configured" keeps an operator who enabled
/// `require_auth` without setting a real key from locking every client out.
pub const PLACEHOLDER_API_KEY: &str = "your-secure-api-key-here";

/// Validates the shared-secret credential against request headers.
///
/// Pure function of configuration + headers; no side effects. Runs before
/// the rate limiter, so rejected requests never consume quota.
pub struct Authenticator {
    require_auth: bool,
    api_key: String,
}

impl Authenticator {
    pub fn new(config: &SecurityConfig) -> Self {
        Self {
            require_auth: config.require_auth,
            api_key: config.api_key.clone(),
        }
    }

    /// Whether requests will actually be challenged. False when auth is
    /// switched off or the key is unset/placeholder (fail-open).
    pub fn enforced(&self) -> bool {
        self.require_auth && !self.api_key.is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }

    /// Decide whether a request carrying these headers is authorized.
    ///
    /// Accepts `Authorization: Bearer <key>` or `X-API-Key: <key>`,
    /// byte-exact: case-sensitive, no trimming.
    pub fn authorize(&self, headers: &HeaderMap) -> bool {
        if !self.enforced() {
            return true;
        }

        if let Some(value) = headers.get(header::AUTHORIZATION) {
            let bearer = format!("Bearer {}", self.api_key);
            if value.as_bytes() == bearer.as_bytes() {
                return true;
            }
        }

        headers
            .get("x-api-key")
            .map(|value| value.as_bytes() == self.api_key.as_bytes())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn authenticator(require_auth: bool, key: &str) -> Authenticator {
        Authenticator::new(&SecurityConfig {
            require_auth,
            api_key: key.to_string(),
        })
    }

    fn headers(name: &'static str, value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn disabled_auth_admits_everything() {
        let auth = authenticator(false, "real-key");
        assert!(!auth.enforced());
        assert!(auth.authorize(&HeaderMap::new()));
    }

    #[test]
    fn placeholder_and_empty_keys_fail_open() {
        for key in [PLACEHOLDER_API_KEY, ""] {
            let auth = authenticator(true, key);
            assert!(!auth.enforced());
            assert!(auth.authorize(&HeaderMap::new()));
            assert!(auth.authorize(&headers("x-api-key", "wrong")));
        }
    }

    #[test]
    fn bearer_header_must_match_exactly() {
        let auth = authenticator(true, "s3cret");
        assert!(auth.enforced());
        assert!(auth.authorize(&headers("authorization", "Bearer s3cret")));
        assert!(!auth.authorize(&headers("authorization", "bearer s3cret")));
        assert!(!auth.authorize(&headers("authorization", "Bearer s3cret ")));
        assert!(!auth.authorize(&headers("authorization", "s3cret")));
    }

    #[test]
    fn api_key_header_must_match_exactly() {
        let auth = authenticator(true, "s3cret");
        assert!(auth.authorize(&headers("x-api-key", "s3cret")));
        assert!(!auth.authorize(&headers("x-api-key", "S3cret")));
        assert!(!auth.authorize(&headers("x-api-key", " s3cret")));
        assert!(!auth.authorize(&HeaderMap::new()));
    }
}
