use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters a join code may contain (no 0/O or 1/I/L)
const ALPHABET: &[u8] = b"23456789ABCDEFGHJKMNPQRSTUVWXYZ";

/// Short human-shareable code resolving to one live lobby
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JoinCode(String);

impl JoinCode {
    /// Generate a random code of `len` characters
    pub fn generate(len: usize) -> Self {
        let mut rng = rand::rng();
        let code = (0..len)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        JoinCode(code)
    }

    /// Normalize user input (surrounding whitespace, lowercase) into a code.
    ///
    /// Returns `None` for input that cannot be a code at all, such as an
    /// empty string or characters outside the alphabet.
    pub fn normalize(input: &str) -> Option<Self> {
        let code = input.trim().to_ascii_uppercase();
        if code.is_empty() || !code.bytes().all(|b| ALPHABET.contains(&b)) {
            return None;
        }
        Some(JoinCode(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JoinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
