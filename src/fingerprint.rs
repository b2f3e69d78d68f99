//! Request fingerprint sent to the resolver endpoint.
//!
//! The resolver rejects obvious bot traffic, so every request carries a
//! plain desktop-browser identity.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, USER_AGENT};

/// Static header set presented on every manifest request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserProfile {
    pub user_agent: &'static str,
    pub accept: &'static str,
    pub connection: &'static str,
}

/// Windows desktop profile used for all resolver requests.
pub const fn desktop_profile() -> BrowserProfile {
    BrowserProfile {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        accept: "*/*",
        connection: "keep-alive",
    }
}

impl BrowserProfile {
    /// Convert to request headers.
    pub fn to_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(self.user_agent));
        headers.insert(ACCEPT, HeaderValue::from_static(self.accept));
        headers.insert(CONNECTION, HeaderValue::from_static(self.connection));
        headers
    }
}

impl Default for BrowserProfile {
    fn default() -> Self {
        desktop_profile()
    }
}
