use crate::url::parse_address;
use url::Url;

/// Extracts the authority (host and optional port) from a URL
///
/// The host is lowercased by the parser for http(s) URLs, and default ports
/// are dropped, so `https://EXAMPLE.com:443/` and `https://example.com/` share
/// an authority.
///
/// # Arguments
///
/// * `url` - The parsed URL
///
/// # Returns
///
/// * `Some(String)` - `host` or `host:port`
/// * `None` - The URL has no host (e.g. `mailto:`)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webscrape::url::authority;
///
/// let url = Url::parse("https://example.com:8080/path").unwrap();
/// assert_eq!(authority(&url), Some("example.com:8080".to_string()));
/// ```
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

/// Checks whether two addresses share the same authority
///
/// Authorities are compared after normalization by [`authority`], not as
/// raw text: hosts are compared lowercased and a default port is the same as
/// no port, so `https://example.com:443/x` shares the authority of
/// `https://example.com`. An explicit non-default port must match exactly.
///
/// Returns false when either side fails to parse or has no host.
pub fn same_authority(a: &str, b: &str) -> bool {
    let (Ok(a), Ok(b)) = (parse_address(a), parse_address(b)) else {
        return false;
    };

    match (authority(&a), authority(&b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
