use url::Url;

/// Outlets rendered with a friendly display name. Anything else falls back to
/// its bare hostname.
const OUTLET_NAMES: &[(&str, &str)] = &[
    ("cbc.ca", "CBC News"),
    ("ctvnews.ca", "CTV News"),
    ("globalnews.ca", "Global News"),
    ("theglobeandmail.com", "Globe and Mail"),
    ("thestar.com", "Toronto Star"),
];

const UNKNOWN_SOURCE: &str = "Unknown";

/// Derive a human-readable outlet name from an article URL.
///
/// Total over arbitrary strings: a URL that fails to parse, or parses without
/// a host, maps to `"Unknown"`. Never persisted; recomputed on every read.
pub fn source_from_url(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return UNKNOWN_SOURCE.to_string(),
    };

    let host = match parsed.host_str() {
        Some(host) => host.strip_prefix("www.").unwrap_or(host),
        None => return UNKNOWN_SOURCE.to_string(),
    };

    OUTLET_NAMES
        .iter()
        .find(|(outlet, _)| *outlet == host)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| host.to_string())
}
