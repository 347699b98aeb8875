//! Password hashing - salted HMAC-SHA256 with a server-side pepper.
//!
//! Stored format is `<salt-hex>$<mac-hex>`. Verification recomputes the MAC
//! over the stored salt and compares in constant time.

use hmac::{Hmac, Mac};
use rand::RngCore;
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const SALT_LEN: usize = 16;

pub struct PasswordHasher {
    pepper: Secret<String>,
}

impl PasswordHasher {
    pub fn new(pepper: Secret<String>) -> Self {
        Self { pepper }
    }

    pub fn hash(&self, password: &str) -> String {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let mac = self.mac(&salt, password);
        format!("{}${}", encode_hex(&salt), encode_hex(&mac))
    }

    /// Constant-time verification. Malformed stored hashes verify false.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let Some((salt_hex, mac_hex)) = stored.split_once('$') else {
            return false;
        };
        let (Some(salt), Some(expected)) = (decode_hex(salt_hex), decode_hex(mac_hex)) else {
            return false;
        };
        let actual = self.mac(&salt, password);
        actual.ct_eq(&expected[..]).into()
    }

    fn mac(&self, salt: &[u8], password: &str) -> Vec<u8> {
        // Key length is unrestricted for HMAC, so new_from_slice cannot fail.
        let mut mac = HmacSha256::new_from_slice(self.pepper.expose_secret().as_bytes())
            .unwrap_or_else(|_| unreachable!("hmac accepts any key length"));
        mac.update(salt);
        mac.update(password.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(Secret::new("test-pepper".to_string()))
    }

    #[test]
    fn round_trip_verifies() {
        let h = hasher();
        let stored = h.hash("hunter2");
        assert!(h.verify("hunter2", &stored));
        assert!(!h.verify("hunter3", &stored));
    }

    #[test]
    fn same_password_hashes_differently() {
        let h = hasher();
        assert_ne!(h.hash("hunter2"), h.hash("hunter2"));
    }

    #[test]
    fn malformed_stored_hash_verifies_false() {
        let h = hasher();
        assert!(!h.verify("hunter2", "not-a-hash"));
        assert!(!h.verify("hunter2", "zz$zz"));
    }

    #[test]
    fn hex_round_trip() {
        let bytes = vec![0u8, 15, 255, 128];
        assert_eq!(decode_hex(&encode_hex(&bytes)), Some(bytes));
        assert_eq!(decode_hex("abc"), None);
    }
}
