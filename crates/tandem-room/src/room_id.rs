//! Room id tokens: short, URL-safe, human-shareable.
//!
//! Tokens are drawn from a fixed 64-character alphabet: digits,
//! lowercase, uppercase, and two URL-safe symbols. Validation is a
//! charset check only; whether the room exists is a separate question
//! answered by the store.

use rand::Rng;
use tandem_protocol::RoomId;

/// The 64-character token alphabet.
pub const ALPHABET: &[u8; 64] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_@";

/// Generated token length. 64^9 ids make collisions on a
/// single-process room count a non-concern.
pub const TOKEN_LEN: usize = 9;

/// Generates a fresh room id.
pub fn generate() -> RoomId {
    let mut rng = rand::rng();
    let token: String = (0..TOKEN_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    RoomId::from(token)
}

/// Returns `true` if the token is non-empty and every character is in
/// the alphabet.
pub fn is_valid(room_id: &RoomId) -> bool {
    let token = room_id.as_str();
    !token.is_empty()
        && token.bytes().all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_valid_tokens() {
        for _ in 0..100 {
            let id = generate();
            assert!(is_valid(&id), "generated invalid id {id}");
            assert_eq!(id.as_str().len(), TOKEN_LEN);
        }
    }

    #[test]
    fn test_generate_does_not_repeat_immediately() {
        // Not a collision-resistance proof, just a sanity check that
        // the generator is actually random.
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_valid_accepts_full_alphabet() {
        let all = String::from_utf8(ALPHABET.to_vec()).unwrap();
        assert!(is_valid(&RoomId::from(all)));
    }

    #[test]
    fn test_is_valid_rejects_empty() {
        assert!(!is_valid(&RoomId::from("")));
    }

    #[test]
    fn test_is_valid_rejects_foreign_characters() {
        assert!(!is_valid(&RoomId::from("abc 123")));
        assert!(!is_valid(&RoomId::from("abc-123")));
        assert!(!is_valid(&RoomId::from("abc#123")));
        assert!(!is_valid(&RoomId::from("日本語")));
    }

    #[test]
    fn test_is_valid_accepts_symbol_characters() {
        assert!(is_valid(&RoomId::from("a_b@c")));
    }
}
