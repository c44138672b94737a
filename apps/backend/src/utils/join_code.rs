//! Room code generation and normalization.
//!
//! Room codes are 6-character strings over Crockford's Base32 alphabet,
//! short enough to read out loud and free of look-alike characters.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

pub const ROOM_CODE_LEN: usize = 6;

/// Generate a random room code.
pub fn generate_room_code() -> String {
    let mut rng = rand::rng();
    let mut code = String::with_capacity(ROOM_CODE_LEN);
    for _ in 0..ROOM_CODE_LEN {
        code.push(CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char);
    }
    code
}

/// Normalize user-entered codes: surrounding whitespace dropped, letters
/// uppercased.
pub fn normalize_room_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_the_right_shape() {
        let code = generate_room_code();
        assert_eq!(code.len(), ROOM_CODE_LEN);
        assert!(code.bytes().all(|b| CROCKFORD.contains(&b)));
    }

    #[test]
    fn consecutive_codes_differ() {
        assert_ne!(generate_room_code(), generate_room_code());
    }

    #[test]
    fn normalization_trims_and_uppercases() {
        assert_eq!(normalize_room_code("  ab12cd \n"), "AB12CD");
    }
}
