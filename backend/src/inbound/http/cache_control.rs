//! Shared cache-control policies for HTTP handlers.

/// Student records are personal data; never store them in shared caches.
pub const PRIVATE_NO_STORE: &str = "private, no-store";

/// Build the cache-control header tuple for responses carrying records.
pub const fn private_no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_STORE)
}
