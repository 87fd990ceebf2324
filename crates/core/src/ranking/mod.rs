//! Final offer ranking and selection.
//!
//! Confirmed in-stock offers always outrank unconfirmed ones; within a
//! class, cheaper wins. The output ordering depends only on price and
//! stock priority, never on fetch arrival order (ties fall back to
//! registry insertion order, which replacement preserves).

use crate::normalize::NormalizedOffer;

/// Select the top-`limit` cheapest offers.
///
/// Partition into confirmed-in-stock and not-confirmed (out-of-stock or
/// unknown). If any offer is confirmed in stock, the result comes entirely
/// from that set; otherwise entirely from the not-confirmed set, sorted
/// ascending by price either way. Both sets empty yields an empty result,
/// which is a valid outcome rather than an error.
pub fn select_cheapest(offers: Vec<NormalizedOffer>, limit: usize) -> Vec<NormalizedOffer> {
    let (in_stock, not_confirmed): (Vec<_>, Vec<_>) = offers
        .into_iter()
        .partition(|o| o.stock_status.is_confirmed_in_stock());

    let mut pool = if in_stock.is_empty() {
        not_confirmed
    } else {
        in_stock
    };

    // Stable sort: equal prices keep their insertion order.
    pool.sort_by_key(|o| o.price_vnd);
    pool.truncate(limit);
    pool
}
