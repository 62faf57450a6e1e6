//! GitHub webhook signature verification using HMAC-SHA256.
//!
//! GitHub signs each webhook delivery with HMAC-SHA256 over the raw request
//! body, keyed by the shared secret configured on the webhook. The signature
//! arrives in the `X-Hub-Signature-256` header as `sha256=<hex>`.
//!
//! Verification must run over the exact bytes received, before any JSON
//! parsing: re-serialization does not guarantee byte-identical output.
//! Invalid signatures are rejected before the body is interpreted at all.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Parses a GitHub signature header (e.g., "sha256=abc123...") into raw bytes.
///
/// Returns `None` for malformed headers (missing prefix, wrong algorithm,
/// invalid hex). Never panics.
///
/// # Examples
///
/// ```
/// use github_webex_relay::webhooks::parse_signature_header;
///
/// assert!(parse_signature_header("sha256=abcd1234").is_some());
/// assert!(parse_signature_header("sha1=abcd1234").is_none());
/// assert!(parse_signature_header("abcd1234").is_none());
/// assert!(parse_signature_header("sha256=not-hex").is_none());
/// ```
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let hex_sig = header.strip_prefix("sha256=")?;
    hex::decode(hex_sig).ok()
}

/// Computes the HMAC-SHA256 signature of a body using the given secret.
///
/// Used by tests and tooling to generate expected signatures.
pub fn compute_signature(body: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(body);
    mac.finalize().into_bytes().to_vec()
}

/// Formats a signature as a GitHub-style header value (`sha256=<hex>`).
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("sha256={}", hex::encode(signature))
}

/// Verifies a GitHub webhook signature against the raw body and secret.
///
/// Returns `true` only when the header carries a well-formed `sha256=<hex>`
/// value matching the HMAC-SHA256 of `body` under `secret`. The comparison is
/// constant-time via the HMAC library, and a length mismatch is treated as
/// unequal without a content-dependent early exit.
///
/// This function never panics; any malformed input yields `false`.
///
/// # Examples
///
/// ```
/// use github_webex_relay::webhooks::{
///     compute_signature, format_signature_header, verify_signature,
/// };
///
/// let body = b"Hello, World!";
/// let secret = b"my-secret-key";
///
/// let header = format_signature_header(&compute_signature(body, secret));
/// assert!(verify_signature(body, &header, secret));
/// assert!(!verify_signature(body, &header, b"wrong-secret"));
/// ```
pub fn verify_signature(body: &[u8], signature_header: &str, secret: &[u8]) -> bool {
    let claimed = match parse_signature_header(signature_header) {
        Some(sig) => sig,
        None => return false,
    };

    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(body);

    // Constant-time comparison via the HMAC library
    mac.verify_slice(&claimed).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Known test vector from GitHub's webhook documentation:
    /// <https://docs.github.com/en/webhooks/using-webhooks/validating-webhook-deliveries>
    #[test]
    fn github_documentation_vector() {
        let body = b"Hello, World!";
        let secret = b"It's a Secret to Everybody";
        let header = "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17";

        assert_eq!(format_signature_header(&compute_signature(body, secret)), header);
        assert!(verify_signature(body, header, secret));
    }

    #[test]
    fn parse_header_valid() {
        assert_eq!(
            parse_signature_header("sha256=1234abcd"),
            Some(vec![0x12, 0x34, 0xab, 0xcd])
        );
        // Uppercase hex is accepted
        assert_eq!(
            parse_signature_header("sha256=ABCD1234"),
            Some(vec![0xab, 0xcd, 0x12, 0x34])
        );
    }

    #[test]
    fn parse_header_malformed() {
        assert_eq!(parse_signature_header(""), None);
        assert_eq!(parse_signature_header("1234abcd"), None);
        assert_eq!(parse_signature_header("sha1=1234abcd"), None);
        assert_eq!(parse_signature_header("sha256=xyz"), None);
        // Odd-length hex is invalid
        assert_eq!(parse_signature_header("sha256=abc"), None);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let body = b"test payload";
        let header = format_signature_header(&compute_signature(body, b"correct-secret"));

        assert!(verify_signature(body, &header, b"correct-secret"));
        assert!(!verify_signature(body, &header, b"wrong-secret"));
    }

    #[test]
    fn verify_rejects_modified_body() {
        let secret = b"secret";
        let header = format_signature_header(&compute_signature(b"original body", secret));

        assert!(verify_signature(b"original body", &header, secret));
        assert!(!verify_signature(b"modified body", &header, secret));
    }

    #[test]
    fn verify_rejects_malformed_headers_without_panic() {
        let body = b"test";
        let secret = b"secret";

        assert!(!verify_signature(body, "", secret));
        assert!(!verify_signature(body, "sha256=", secret));
        assert!(!verify_signature(body, "sha256=invalid", secret));
        assert!(!verify_signature(body, "sha1=abc123", secret));
        assert!(!verify_signature(body, "not-a-header", secret));
    }

    #[test]
    fn verify_rejects_truncated_signature() {
        let body = b"test payload";
        let secret = b"secret";
        let full = compute_signature(body, secret);

        // A valid-hex prefix of the real signature differs in length only
        let truncated = format_signature_header(&full[..16]);
        assert!(!verify_signature(body, &truncated, secret));
    }

    #[test]
    fn verify_accepts_empty_body_and_secret() {
        let header = format_signature_header(&compute_signature(b"", b""));
        assert!(verify_signature(b"", &header, b""));
    }

    proptest! {
        /// For all bodies and secrets, sign-then-verify succeeds.
        #[test]
        fn prop_sign_verify_roundtrip(body: Vec<u8>, secret: Vec<u8>) {
            let header = format_signature_header(&compute_signature(&body, &secret));
            prop_assert!(verify_signature(&body, &header, &secret));
        }

        /// Signing with one secret and verifying with another always fails.
        #[test]
        fn prop_wrong_secret_fails(body: Vec<u8>, secret1: Vec<u8>, secret2: Vec<u8>) {
            prop_assume!(secret1 != secret2);

            let header = format_signature_header(&compute_signature(&body, &secret1));
            prop_assert!(!verify_signature(&body, &header, &secret2));
        }

        /// Any modification to the body causes verification to fail.
        #[test]
        fn prop_modified_body_fails(original: Vec<u8>, modified: Vec<u8>, secret: Vec<u8>) {
            prop_assume!(original != modified);

            let header = format_signature_header(&compute_signature(&original, &secret));
            prop_assert!(!verify_signature(&modified, &header, &secret));
        }

        /// Flipping any single byte of the signature causes verification to
        /// fail, regardless of the byte's position.
        #[test]
        fn prop_corrupted_signature_fails(body: Vec<u8>, secret: Vec<u8>, position in 0usize..32) {
            let mut sig = compute_signature(&body, &secret);
            sig[position] ^= 0x01;
            let header = format_signature_header(&sig);
            prop_assert!(!verify_signature(&body, &header, &secret));
        }

        /// Signing is deterministic.
        #[test]
        fn prop_signature_deterministic(body: Vec<u8>, secret: Vec<u8>) {
            prop_assert_eq!(compute_signature(&body, &secret), compute_signature(&body, &secret));
        }

        /// Malformed headers never cause a panic.
        #[test]
        fn prop_malformed_header_no_panic(header: String, body: Vec<u8>, secret: Vec<u8>) {
            let _ = parse_signature_header(&header);
            let _ = verify_signature(&body, &header, &secret);
        }
    }
}
