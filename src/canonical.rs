/// Canonical identity of a host: lower-cased, trimmed, every leading "www."
/// label removed.
///
/// All leading "www." labels go, not just one: `www.www.example.com` becomes
/// `example.com`, so `canonicalize(canonicalize(h)) == canonicalize(h)`.
/// Other subdomains are kept, so `shop.example.com` and `example.com` stay
/// distinct.
pub fn canonicalize(host: &str) -> String {
    let mut normalized = host.trim().to_lowercase();
    while let Some(rest) = normalized.strip_prefix("www.") {
        normalized = rest.trim().to_string();
    }
    normalized
}
