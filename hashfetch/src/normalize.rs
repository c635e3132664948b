//! Identifier normalization.

/// Schemes recognized as already present on an identifier.
const SCHEMES: [&str; 2] = ["http://", "https://"];

/// Scheme prepended to identifiers that declare none.
pub const DEFAULT_SCHEME: &str = "http://";

/// Return `identifier` unchanged if it starts with a recognized scheme, otherwise prefixed with [`DEFAULT_SCHEME`].
///
/// ```
/// # use hashfetch::normalize::normalize_url;
/// assert_eq!(normalize_url("example.com"), "http://example.com");
/// assert_eq!(normalize_url("https://example.com"), "https://example.com");
/// ```
pub fn normalize_url(identifier: &str) -> String {
    if SCHEMES.iter().any(|scheme| identifier.starts_with(scheme)) {
        identifier.to_owned()
    } else {
        format!("{DEFAULT_SCHEME}{identifier}")
    }
}
