//! Shopping region and its display currency.
//!
//! A visitor is either shopping domestically (`KR`) or from anywhere else
//! (`GLOBAL`). The display currency is never chosen on its own: it is always
//! derived from the region through [`Currency::for_region`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of the cookie that remembers the visitor's region.
pub const REGION_COOKIE_NAME: &str = "storehaus_region";

/// Lifetime of the region cookie.
pub const REGION_COOKIE_MAX_AGE_DAYS: i64 = 365;

/// Coarse geographic bucket that drives price display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    /// Domestic shoppers, priced in won.
    Kr,
    /// Everyone else, priced in US dollars.
    #[default]
    Global,
}

impl Region {
    /// All regions, in display order.
    pub const ALL: [Self; 2] = [Self::Kr, Self::Global];

    /// Token used in cookies and JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Kr => "KR",
            Self::Global => "GLOBAL",
        }
    }

    /// Currency prices are shown in for this region.
    #[must_use]
    pub const fn currency(self) -> Currency {
        Currency::for_region(self)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a region token is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown region: {0}")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("KR") {
            Ok(Self::Kr)
        } else if token.eq_ignore_ascii_case("GLOBAL") {
            Ok(Self::Global)
        } else {
            Err(UnknownRegion(token.to_owned()))
        }
    }
}

/// Display currency. Exactly one per region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.currency_code", rename_all = "UPPERCASE")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// South Korean won.
    Krw,
    /// US dollar.
    Usd,
}

impl Currency {
    /// The fixed region -> currency mapping.
    #[must_use]
    pub const fn for_region(region: Region) -> Self {
        match region {
            Region::Kr => Self::Krw,
            Region::Global => Self::Usd,
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Krw => "KRW",
            Self::Usd => "USD",
        }
    }

    /// Symbol used when formatting prices.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Krw => "₩",
            Self::Usd => "$",
        }
    }

    /// Number of minor-unit digits shown for this currency.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        match self {
            Self::Krw => 0,
            Self::Usd => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where a region choice is remembered between visits.
///
/// Persistence is best effort: implementations swallow (and report) their own
/// failures, the in-memory context is updated regardless.
pub trait RegionPersistence {
    /// Remember `region` for subsequent visits.
    fn persist(&mut self, region: Region);
}

/// Region state for one browsing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionContext {
    region: Region,
    currency: Currency,
    loading: bool,
}

impl RegionContext {
    /// Build a context for an explicit region.
    #[must_use]
    pub const fn new(region: Region) -> Self {
        Self {
            region,
            currency: Currency::for_region(region),
            loading: false,
        }
    }

    /// Build the initial context from a persisted cookie value.
    ///
    /// A missing or unrecognised value falls back to [`Region::Global`].
    #[must_use]
    pub fn from_cookie(value: Option<&str>) -> Self {
        let region = value
            .and_then(|v| v.parse::<Region>().ok())
            .unwrap_or_default();
        Self::new(region)
    }

    /// Current region.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Current display currency, derived from the region.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Whether a region transition is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Switch region, re-derive the currency, and persist the choice.
    pub fn set_region<P: RegionPersistence>(&mut self, region: Region, persistence: &mut P) {
        self.loading = true;
        self.region = region;
        self.currency = Currency::for_region(region);
        persistence.persist(region);
        self.loading = false;
    }
}

impl Default for RegionContext {
    fn default() -> Self {
        Self::new(Region::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stand-in for a cookie jar that survives between "page loads".
    #[derive(Default)]
    struct FakeCookieJar {
        value: Option<String>,
    }

    impl RegionPersistence for FakeCookieJar {
        fn persist(&mut self, region: Region) {
            self.value = Some(region.to_string());
        }
    }

    /// Storage that is unavailable; writes are dropped.
    struct BrokenStorage;

    impl RegionPersistence for BrokenStorage {
        fn persist(&mut self, _region: Region) {}
    }

    #[test]
    fn test_currency_mapping_is_total() {
        for region in Region::ALL {
            let currency = Currency::for_region(region);
            assert!(matches!(currency, Currency::Krw | Currency::Usd));
            assert_eq!(region.currency(), currency);
        }
        assert_eq!(Currency::for_region(Region::Kr), Currency::Krw);
        assert_eq!(Currency::for_region(Region::Global), Currency::Usd);
    }

    #[test]
    fn test_region_parse_is_case_insensitive() {
        assert_eq!("kr".parse::<Region>(), Ok(Region::Kr));
        assert_eq!(" Global ".parse::<Region>(), Ok(Region::Global));
        assert!("US".parse::<Region>().is_err());
    }

    #[test]
    fn test_region_token_round_trip() {
        for region in Region::ALL {
            assert_eq!(region.as_str().parse::<Region>(), Ok(region));
        }
    }

    #[test]
    fn test_defaults_to_global_without_cookie() {
        let ctx = RegionContext::from_cookie(None);
        assert_eq!(ctx.region(), Region::Global);
        assert_eq!(ctx.currency(), Currency::Usd);
        assert!(!ctx.is_loading());

        let ctx = RegionContext::from_cookie(Some("garbage"));
        assert_eq!(ctx.region(), Region::Global);
    }

    #[test]
    fn test_switch_to_domestic_updates_currency_and_cookie() {
        let mut jar = FakeCookieJar::default();
        let mut ctx = RegionContext::from_cookie(jar.value.as_deref());
        assert_eq!(ctx.currency(), Currency::Usd);

        ctx.set_region(Region::Kr, &mut jar);
        assert_eq!(ctx.region(), Region::Kr);
        assert_eq!(ctx.currency(), Currency::Krw);
        assert!(!ctx.is_loading());

        // Next page load reads the cookie written above.
        let next_visit = RegionContext::from_cookie(jar.value.as_deref());
        assert_eq!(next_visit.region(), Region::Kr);
        assert_eq!(next_visit.currency(), Currency::Krw);
    }

    #[test]
    fn test_persistence_failure_keeps_in_memory_region() {
        let mut ctx = RegionContext::default();
        ctx.set_region(Region::Kr, &mut BrokenStorage);
        assert_eq!(ctx.region(), Region::Kr);
        assert_eq!(ctx.currency(), Currency::Krw);
    }

    #[test]
    fn test_context_serializes_camel_case() {
        let json = serde_json::to_value(RegionContext::new(Region::Kr)).unwrap_or_default();
        assert_eq!(json["region"], "KR");
        assert_eq!(json["currency"], "KRW");
        assert_eq!(json["loading"], false);
    }
}
