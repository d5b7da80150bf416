// Request path matching for the routing API

/// Prefix of the routing-by-UID endpoint
pub const ROUTING_PREFIX: &str = "/api/routing/by-rfid";
pub const HEALTH_PATH: &str = "/health";

/// Matched API route
#[derive(Debug, PartialEq, Eq)]
pub enum ApiRoute {
    Health,
    /// Percent-decoded, not yet normalized UID segment
    RoutingByRfid(String),
}

/// Match a request path against the known routes. A single trailing slash is
/// ignored; an absent or empty UID segment yields an empty UID.
pub fn match_route(path: &str) -> Option<ApiRoute> {
    let path = path.strip_suffix('/').unwrap_or(path);

    if path == HEALTH_PATH {
        return Some(ApiRoute::Health);
    }

    let rest = path.strip_prefix(ROUTING_PREFIX)?;
    if rest.is_empty() {
        return Some(ApiRoute::RoutingByRfid(String::new()));
    }
    let segment = rest.strip_prefix('/')?;
    if segment.contains('/') {
        return None;
    }
    Some(ApiRoute::RoutingByRfid(percent_decode(segment)))
}

/// Decode `%XX` escapes. Input with a malformed escape or that does not decode
/// to UTF-8 is returned unchanged rather than rejected with 400.
pub fn percent_decode(input: &str) -> String {
    fn hex(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }

    if !input.contains('%') {
        return input.to_string();
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let decoded = bytes
                .get(i + 1..i + 3)
                .and_then(|pair| Some((hex(pair[0])? << 4) | hex(pair[1])?));
            let Some(byte) = decoded else {
                return input.to_string();
            };
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).unwrap_or_else(|_| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_health() {
        assert_eq!(match_route("/health"), Some(ApiRoute::Health));
        assert_eq!(match_route("/health/"), Some(ApiRoute::Health));
        assert_eq!(match_route("/healthz"), None);
    }

    #[test]
    fn test_match_routing_segment() {
        assert_eq!(
            match_route("/api/routing/by-rfid/a1b2"),
            Some(ApiRoute::RoutingByRfid("a1b2".to_string()))
        );
        assert_eq!(
            match_route("/api/routing/by-rfid/a1b2/"),
            Some(ApiRoute::RoutingByRfid("a1b2".to_string()))
        );
        assert_eq!(
            match_route("/api/routing/by-rfid/%20a1b2%20"),
            Some(ApiRoute::RoutingByRfid(" a1b2 ".to_string()))
        );
    }

    #[test]
    fn test_match_empty_segment() {
        assert_eq!(
            match_route("/api/routing/by-rfid/"),
            Some(ApiRoute::RoutingByRfid(String::new()))
        );
        assert_eq!(
            match_route("/api/routing/by-rfid"),
            Some(ApiRoute::RoutingByRfid(String::new()))
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(match_route("/"), None);
        assert_eq!(match_route("/api/routing/by-rfid/a/b"), None);
        assert_eq!(match_route("/api/routing/by-rfidX"), None);
        assert_eq!(match_route("/api/routing"), None);
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("A1B2"), "A1B2");
        assert_eq!(percent_decode("04%3AA3%3aFF"), "04:A3:FF");
        assert_eq!(percent_decode("caf%C3%A9"), "café");
        // Malformed escapes keep the raw text
        assert_eq!(percent_decode("50%"), "50%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%FF"), "%FF");
    }
}
