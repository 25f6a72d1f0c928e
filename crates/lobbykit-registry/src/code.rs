//! Lobby code generation.

use lobbykit_protocol::LobbyCode;
use rand::Rng;

/// Lowercase base-36: what a player can read over voice chat and type
/// on a phone keyboard.
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Produces short pseudo-random lobby codes.
///
/// The generator makes no uniqueness guarantee; collision retry against
/// currently-open lobbies is the registry's job.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    length: usize,
}

impl CodeGenerator {
    /// Creates a generator producing codes of the given length.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Draws one code.
    pub fn generate(&self) -> LobbyCode {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| {
                let idx = rng.random_range(0..ALPHABET.len());
                ALPHABET[idx] as char
            })
            .collect();
        LobbyCode(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_has_configured_length() {
        let generator = CodeGenerator::new(5);
        assert_eq!(generator.generate().as_str().len(), 5);

        let generator = CodeGenerator::new(8);
        assert_eq!(generator.generate().as_str().len(), 8);
    }

    #[test]
    fn test_generated_code_uses_base36_alphabet() {
        let generator = CodeGenerator::new(5);
        for _ in 0..100 {
            let code = generator.generate();
            assert!(
                code.as_str()
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "unexpected character in {code}"
            );
        }
    }

    #[test]
    fn test_codes_vary() {
        // 36^5 draws; 20 identical codes in a row means a broken rng.
        let generator = CodeGenerator::new(5);
        let first = generator.generate();
        let all_same =
            (0..20).all(|_| generator.generate() == first);
        assert!(!all_same);
    }
}
