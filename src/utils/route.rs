//! Route pattern extraction utilities.

use actix_web::HttpRequest;

/// Label used for requests that matched no registered route
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Route pattern the request was dispatched to, for metric labels
///
/// Uses the registered pattern rather than the raw path so probes for
/// arbitrary URLs cannot blow up label cardinality.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}
