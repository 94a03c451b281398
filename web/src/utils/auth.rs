//! Browser-side access to the agency session token.

use serde::{Deserialize, Serialize};

use crate::utils::storage;

pub const AUTH_TOKEN_KEY: &str = "agency_auth_token";
pub const BRAND_TOKEN_KEY: &str = "brand_auth_token";

/// Payload of the agency JWT. Only read here for display; the server
/// verifies the signature.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: usize,
    pub user_type: String,
    pub user_id: i64,
}

/// Token stored by the login flow, or an empty string when there is none.
/// Server functions reject an empty token as unauthorized.
pub fn get_auth_token() -> String {
    storage::read(AUTH_TOKEN_KEY).unwrap_or_default()
}

pub fn get_brand_token() -> String {
    storage::read(BRAND_TOKEN_KEY).unwrap_or_default()
}

pub fn is_authenticated() -> bool {
    session_claims().is_some()
}

/// Decodes the claims without verifying them.
pub fn session_claims() -> Option<SessionClaims> {
    let token = get_auth_token();
    let payload = token.split('.').nth(1)?;
    let decoded = storage::base64_decode(&standard_base64(payload))?;
    serde_json::from_str(&decoded).ok()
}

/// JWT segments are unpadded base64url; `atob` wants padded standard base64.
fn standard_base64(segment: &str) -> String {
    let mut out = segment.replace('-', "+").replace('_', "/");
    match out.len() % 4 {
        2 => out.push_str("=="),
        3 => out.push('='),
        _ => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64url_segments_are_padded() {
        assert_eq!(standard_base64("eyJzdWIi"), "eyJzdWIi");
        assert_eq!(standard_base64("ab-_cd"), "ab+/cd==");
        assert_eq!(standard_base64("abc"), "abc=");
    }
}
