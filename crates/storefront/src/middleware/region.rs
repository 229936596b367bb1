//! Region cookie handling.
//!
//! The shopper's region is read once per request from the `storehaus_region`
//! cookie and written back through [`CookieRegionPersistence`] when it changes.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, header::COOKIE, request::Parts},
};
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

use storehaus_core::{
    REGION_COOKIE_MAX_AGE_DAYS, REGION_COOKIE_NAME, Region, RegionContext, RegionPersistence,
};

/// Extractor for the region context carried by the request's cookie.
///
/// Never rejects: a missing or unknown cookie yields the `GLOBAL` default.
#[derive(Debug, Clone, Copy)]
pub struct RegionPreference(pub RegionContext);

impl<S> FromRequestParts<S> for RegionPreference
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = region_cookie_value(&parts.headers);
        Ok(Self(RegionContext::from_cookie(value.as_deref())))
    }
}

/// Value of the region cookie, if the request carries one.
fn region_cookie_value(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|raw| Cookie::split_parse(raw))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == REGION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
}

/// Build the region cookie.
fn region_cookie(region: Region, secure: bool) -> Cookie<'static> {
    Cookie::build((REGION_COOKIE_NAME, region.as_str()))
        .path("/")
        .max_age(Duration::days(REGION_COOKIE_MAX_AGE_DAYS))
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Persists a region choice as a `Set-Cookie` header on the response.
#[derive(Debug, Default)]
pub struct CookieRegionPersistence {
    secure: bool,
    set_cookie: Option<HeaderValue>,
}

impl CookieRegionPersistence {
    #[must_use]
    pub const fn new(secure: bool) -> Self {
        Self {
            secure,
            set_cookie: None,
        }
    }

    /// The `Set-Cookie` value to send, if a region was persisted.
    #[must_use]
    pub fn into_header(self) -> Option<HeaderValue> {
        self.set_cookie
    }
}

impl RegionPersistence for CookieRegionPersistence {
    fn persist(&mut self, region: Region) {
        let cookie = region_cookie(region, self.secure);
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => self.set_cookie = Some(value),
            Err(e) => tracing::warn!(error = %e, %region, "Failed to encode region cookie"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storehaus_core::Currency;

    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_reads_region_among_other_cookies() {
        let headers = headers("storehaus_session=abc; storehaus_region=KR; theme=dark");
        assert_eq!(region_cookie_value(&headers).as_deref(), Some("KR"));
    }

    #[test]
    fn test_missing_cookie() {
        assert_eq!(region_cookie_value(&HeaderMap::new()), None);
        assert_eq!(region_cookie_value(&headers("theme=dark")), None);
    }

    #[test]
    fn test_persist_writes_cookie_attributes() {
        let mut ctx = RegionContext::default();
        let mut jar = CookieRegionPersistence::new(false);
        ctx.set_region(Region::Kr, &mut jar);

        assert_eq!(ctx.currency(), Currency::Krw);
        let header = jar.into_header().unwrap();
        let header = header.to_str().unwrap();
        assert!(header.contains("storehaus_region=KR"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Max-Age=31536000"));
        assert!(header.contains("SameSite=Lax"));
        assert!(!header.contains("Secure"));
    }

    #[test]
    fn test_secure_flag_follows_config() {
        let mut jar = CookieRegionPersistence::new(true);
        jar.persist(Region::Global);
        let header = jar.into_header().unwrap();
        assert!(header.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn test_cookie_round_trip() {
        let mut jar = CookieRegionPersistence::new(false);
        jar.persist(Region::Kr);
        let set_cookie = jar.into_header().unwrap();
        let pair = set_cookie.to_str().unwrap().split(';').next().unwrap().to_owned();

        let value = region_cookie_value(&headers(&pair));
        let ctx = RegionContext::from_cookie(value.as_deref());
        assert_eq!(ctx.region(), Region::Kr);
    }
}
