use serde::{Deserialize, Serialize};

pub const DEFAULT_LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DEFAULT_DIGITS: &str = "0123456789";
pub const DEFAULT_SYMBOLS: &str = "!#$%&()*+";

/// The three character classes a password is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabets {
    pub letters: Vec<char>,
    pub digits: Vec<char>,
    pub symbols: Vec<char>,
}

impl Alphabets {
    pub fn new(letters: &str, digits: &str, symbols: &str) -> Self {
        Self {
            letters: letters.chars().collect(),
            digits: digits.chars().collect(),
            symbols: symbols.chars().collect(),
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.letters.contains(&c) || self.digits.contains(&c) || self.symbols.contains(&c)
    }
}

impl Default for Alphabets {
    fn default() -> Self {
        Self::new(DEFAULT_LETTERS, DEFAULT_DIGITS, DEFAULT_SYMBOLS)
    }
}
