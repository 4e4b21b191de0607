//! HTTP access for the recipe API.
//!
//! Outgoing GET requests go through [`HttpClient`] so the MealDB client can be
//! exercised against [`MockClient`] in tests and throttled per host in
//! production.

mod client;
mod rate_limiter;

pub use client::{HttpClient, MockClient, MockResponse, ReqwestClient, ReqwestClientBuilder};
pub use rate_limiter::RateLimiter;

/// Host part of a URL, used as the rate limiting key.
pub fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of() {
        assert_eq!(
            host_of("https://WWW.TheMealDB.com/api/json/v1/1/random.php").as_deref(),
            Some("www.themealdb.com")
        );
        assert_eq!(host_of("not a url"), None);
    }
}
