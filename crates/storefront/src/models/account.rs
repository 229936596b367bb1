//! Account overview counters.

use serde::Serialize;

/// Aggregate counters for the account dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    pub order_count: i64,
    pub address_count: i64,
    /// Units purchased across all orders.
    pub total_items: i64,
    /// Always 0: favorites live in the browser's wishlist, not on the server.
    pub favorite_count: i64,
}

impl AccountStats {
    /// Build stats from each order's unit count and the address count.
    #[must_use]
    pub fn tally(item_counts: &[i64], address_count: i64) -> Self {
        Self {
            order_count: i64::try_from(item_counts.len()).unwrap_or(i64::MAX),
            address_count,
            total_items: item_counts.iter().sum(),
            favorite_count: 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_total_items_sums_quantities() {
        let stats = AccountStats::tally(&[3, 5], 1);
        assert_eq!(stats.order_count, 2);
        assert_eq!(stats.total_items, 8);
        assert_eq!(stats.address_count, 1);
        assert_eq!(stats.favorite_count, 0);
    }

    #[test]
    fn test_new_account() {
        let stats = AccountStats::tally(&[], 0);
        assert_eq!(stats, AccountStats {
            order_count: 0,
            address_count: 0,
            total_items: 0,
            favorite_count: 0,
        });
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["favoriteCount"], 0);
        assert_eq!(json["totalItems"], 0);
    }
}
