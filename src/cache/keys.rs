//! Deterministic cache keys for the cached listing paths.
//!
//! Identical filter tuples must map to identical keys and distinct tuples to
//! distinct keys, so invalidation can target exact entries.

/// Default limit applied by the `orders` query; invalidation targets keys
/// derived with this limit.
pub const DEFAULT_ORDER_LIMIT: u64 = 50;

/// Default limit applied by the `customers` query.
pub const DEFAULT_CUSTOMER_LIMIT: u64 = 100;

/// Key for an order listing filtered by optional customer and status.
pub fn order_list_key(limit: u64, customer_id: Option<i32>, status: Option<&str>) -> String {
    let customer = customer_id.map_or_else(|| "all".to_string(), |id| id.to_string());
    let status = status.unwrap_or("all");
    format!("orders_{}_{}_{}", limit, customer, status)
}

/// Key for the default (unsearched) customer listing.
pub fn customer_list_key(limit: u64) -> String {
    format!("customers_{}_all", limit)
}
