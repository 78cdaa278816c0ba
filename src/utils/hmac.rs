//! HMAC-SHA256 signing helpers for session cookies.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn mac_for(secret: &str, payload: &str, timestamp: u64) -> Result<HmacSha256, String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| format!("Invalid secret key: {e}"))?;
    mac.update(format!("{timestamp}.{payload}").as_bytes());
    Ok(mac)
}

/// Generate a hex HMAC-SHA256 signature over `{timestamp}.{payload}`
pub fn generate_signature(secret: &str, payload: &str, timestamp: u64) -> Result<String, String> {
    let mac = mac_for(secret, payload, timestamp)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a hex signature produced by [`generate_signature`]
///
/// The comparison is constant time. Malformed hex is reported as a mismatch.
pub fn verify_signature(secret: &str, payload: &str, timestamp: u64, signature: &str) -> bool {
    let Ok(signature_bytes) = hex::decode(signature) else {
        return false;
    };

    match mac_for(secret, payload, timestamp) {
        Ok(mac) => mac.verify_slice(&signature_bytes).is_ok(),
        Err(_) => false,
    }
}
