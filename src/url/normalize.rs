use crate::url::authority;
use crate::{UrlError, UrlResult};
use url::{ParseError, Url};

/// Characters that may never appear literally in a URI reference
const ILLEGAL_REFERENCE_CHARS: &[char] = &[' ', '"', '<', '>', '\\', '^', '`', '{', '|', '}'];

/// Checks that a string is a syntactically acceptable URI reference
///
/// The `url` crate quietly percent-encodes spaces and other illegal
/// characters, which would let obviously broken hrefs into the crawl. This
/// check rejects them up front: ASCII control characters, the characters in
/// `" <>\^`{|}` and a `%` not followed by two hex digits.
///
/// # Arguments
///
/// * `reference` - An absolute or relative URL string
///
/// # Returns
///
/// * `Ok(())` - The reference may be parsed or resolved
/// * `Err(UrlError::IllegalCharacter)` - The reference is malformed
pub fn check_reference(reference: &str) -> UrlResult<()> {
    let illegal = |ch: char| {
        Err(UrlError::IllegalCharacter {
            reference: reference.to_string(),
            ch,
        })
    };

    let bytes = reference.as_bytes();
    for (index, ch) in reference.char_indices() {
        if ch.is_ascii_control() || ILLEGAL_REFERENCE_CHARS.contains(&ch) {
            return illegal(ch);
        }

        if ch == '%' {
            let escaped = bytes.get(index + 1..index + 3);
            if !escaped.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return illegal(ch);
            }
        }
    }

    Ok(())
}

/// Parses a string as an absolute address
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError::RelativeWithoutBase)` - The string is a relative reference
/// * `Err(UrlError::IllegalCharacter)` - The string contains illegal characters
/// * `Err(UrlError::Parse)` - Any other parse failure
///
/// # Examples
///
/// ```
/// use webscrape::url::parse_address;
/// use webscrape::UrlError;
///
/// assert!(parse_address("https://example.com/jobs").is_ok());
/// assert!(matches!(
///     parse_address("/jobs"),
///     Err(UrlError::RelativeWithoutBase(_))
/// ));
/// ```
pub fn parse_address(address: &str) -> UrlResult<Url> {
    check_reference(address)?;

    Url::parse(address).map_err(|e| match e {
        ParseError::RelativeUrlWithoutBase => UrlError::RelativeWithoutBase(address.to_string()),
        other => UrlError::Parse(format!("{}: {}", address, other)),
    })
}

/// Resolves a link reference to an absolute address
///
/// Absolute references are returned as written. Relative references are
/// resolved against `base` following RFC 3986. In both cases a single trailing
/// `/` is removed. If either input cannot be parsed the reference is returned
/// verbatim, so the caller's crawlability check will reject it.
///
/// # Arguments
///
/// * `reference` - The href value found on a page
/// * `base` - An absolute address to resolve against
///
/// # Examples
///
/// ```
/// use webscrape::url::resolve_absolute;
///
/// assert_eq!(
///     resolve_absolute("/socials", "https://example.com"),
///     "https://example.com/socials"
/// );
/// assert_eq!(
///     resolve_absolute("https://other.com/", "https://example.com"),
///     "https://other.com"
/// );
/// assert_eq!(resolve_absolute("not a url", "https://example.com"), "not a url");
/// ```
pub fn resolve_absolute(reference: &str, base: &str) -> String {
    match try_resolve(reference, base) {
        Ok(resolved) => strip_trailing_slash(&resolved).to_string(),
        Err(e) => {
            tracing::trace!("Keeping reference {:?} unresolved: {}", reference, e);
            reference.to_string()
        }
    }
}

fn try_resolve(reference: &str, base: &str) -> UrlResult<String> {
    match parse_address(reference) {
        Ok(_) => Ok(reference.to_string()),
        Err(UrlError::RelativeWithoutBase(_)) => {
            let base = parse_address(base)?;
            base.join(reference)
                .map(String::from)
                .map_err(|e| UrlError::Parse(format!("{}: {}", reference, e)))
        }
        Err(e) => Err(e),
    }
}

/// Reduces an address to its canonical form: `scheme://authority/path`
///
/// Query string and fragment are dropped, and a single trailing `/` on the
/// path is removed so that `https://example.com` and `https://example.com/`
/// name the same page. Input that does not parse, or has no host, is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use webscrape::url::canonicalize;
///
/// assert_eq!(canonicalize("https://example.com/a?x=1"), "https://example.com/a");
/// assert_eq!(canonicalize("https://example.com/a#frag"), "https://example.com/a");
/// assert_eq!(canonicalize("https://example.com/"), "https://example.com");
/// ```
pub fn canonicalize(address: &str) -> String {
    let url = match parse_address(address) {
        Ok(url) => url,
        Err(_) => return address.to_string(),
    };

    let Some(authority) = authority(&url) else {
        return address.to_string();
    };

    format!(
        "{}://{}{}",
        url.scheme(),
        authority,
        strip_trailing_slash(url.path())
    )
}

fn strip_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}
