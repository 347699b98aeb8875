//! Authentication services: password hashing and access tokens.

pub mod password;
pub mod token;

pub use password::PasswordHasher;
pub use token::{TokenError, TokenIssuer};

use rand::Rng;

/// Generates a verification code of uppercase letters and digits.
pub fn generate_verification_code(len: usize) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_requested_length_and_alphabet() {
        let code = generate_verification_code(6);
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
