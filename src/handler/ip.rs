//! Caller address extraction
//!
//! The edge in front of this service reports the caller's address in a
//! request header. The value is taken on trust but must look like an IPv4
//! dotted quad before it is echoed back.

use hyper::header::HeaderMap;

/// Extract the caller address from the configured header.
///
/// `None` when the header is absent or its value is not visible ASCII.
pub fn caller_ip(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Shape check for an IPv4 dotted quad: four groups of one to three ASCII
/// digits separated by dots.
///
/// Not an address parse. Groups above 255 pass (`999.999.999.999` is
/// accepted), IPv6 and anything else is rejected.
pub fn is_dotted_quad(candidate: &str) -> bool {
    let groups: Vec<&str> = candidate.split('.').collect();
    if groups.len() != 4 {
        return false;
    }
    groups.iter().all(|group| {
        !group.is_empty() && group.len() <= 3 && group.bytes().all(|byte| byte.is_ascii_digit())
    })
}
