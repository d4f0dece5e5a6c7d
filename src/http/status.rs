//! Status codes understood by the proxy.

pub const OK: u16 = 200;
pub const NOT_FOUND: u16 = 404;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// Codes relayed to clients as-is. Anything else from an origin becomes a 500.
pub const SUPPORTED: [u16; 3] = [OK, NOT_FOUND, INTERNAL_SERVER_ERROR];

pub fn is_supported(code: u16) -> bool {
    SUPPORTED.contains(&code)
}

/// Canonical reason phrase for the codes this proxy synthesizes.
pub fn reason_phrase(code: u16) -> &'static str {
    match code {
        OK => "OK",
        NOT_FOUND => "Not Found",
        INTERNAL_SERVER_ERROR => "Internal Server Error",
        _ => "",
    }
}
