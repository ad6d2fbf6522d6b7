use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Admin Secret
// =============================================================================

/// Compare a submitted admin password with the configured one
///
/// Both sides are run through HMAC-SHA256 under a fixed key and compared with
/// `verify_slice`, which is constant-time, so response timing does not leak
/// how much of the password matched.
pub fn verify_admin_password(candidate: &str, expected: &str) -> bool {
    if expected.is_empty() {
        tracing::error!("Admin password is not configured");
        return false;
    }

    let mut expected_mac = match HmacSha256::new_from_slice(b"admin-password") {
        Ok(m) => m,
        Err(_) => {
            tracing::error!("Failed to create HMAC instance");
            return false;
        }
    };
    expected_mac.update(expected.as_bytes());
    let expected_tag = expected_mac.finalize().into_bytes();

    let mut candidate_mac = match HmacSha256::new_from_slice(b"admin-password") {
        Ok(m) => m,
        Err(_) => return false,
    };
    candidate_mac.update(candidate.as_bytes());

    candidate_mac.verify_slice(&expected_tag).is_ok()
}

// =============================================================================
// Upload Provider Signing
// =============================================================================

/// Sign Cloudinary upload parameters
///
/// Parameters are sorted by name, joined as `k=v&k=v`, the API secret is
/// appended, and the result is hashed with SHA-256 (hex encoded).
/// `file`, `api_key`, `cloud_name` and `resource_type` must not be passed in.
pub fn cloudinary_signature(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_admin_password() {
        assert!(verify_admin_password("noivos2025", "noivos2025"));
        assert!(!verify_admin_password("noivos2024", "noivos2025"));
        assert!(!verify_admin_password("", "noivos2025"));
        assert!(!verify_admin_password("NOIVOS2025", "noivos2025"));
    }

    #[test]
    fn test_verify_admin_password_unconfigured() {
        assert!(!verify_admin_password("", ""));
    }

    #[test]
    fn test_cloudinary_signature_sorts_params() {
        let a = cloudinary_signature(
            &[("timestamp", "1700000000".into()), ("folder", "f".into())],
            "secret",
        );
        let b = cloudinary_signature(
            &[("folder", "f".into()), ("timestamp", "1700000000".into())],
            "secret",
        );
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_cloudinary_signature_known_value() {
        // sha256("folder=f&timestamp=1secret")
        let mut hasher = Sha256::new();
        hasher.update(b"folder=f&timestamp=1secret");
        let expected = hex::encode(hasher.finalize());

        let actual = cloudinary_signature(
            &[("timestamp", "1".into()), ("folder", "f".into())],
            "secret",
        );
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_cloudinary_signature_skips_empty_values() {
        let with_empty = cloudinary_signature(
            &[("folder", "f".into()), ("public_id", String::new())],
            "secret",
        );
        let without = cloudinary_signature(&[("folder", "f".into())], "secret");
        assert_eq!(with_empty, without);
    }
}
