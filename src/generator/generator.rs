use ring::rand::{SecureRandom, SystemRandom};
use std::ops::RangeInclusive;
use std::sync::Arc;
use thiserror::Error;

use crate::generator::alphabets::Alphabets;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("{0} alphabet is empty")]
    EmptyAlphabet(&'static str),
    #[error("{0} count range is empty")]
    EmptyRange(&'static str),
    #[error("failed to obtain system randomness")]
    Randomness,
}

// Randomness provider for deterministic testing.
pub trait Rng: Send + Sync {
    fn fill(&self, bytes: &mut [u8]) -> Result<(), GeneratorError>;
}

pub struct SystemRng;

impl Rng for SystemRng {
    fn fill(&self, bytes: &mut [u8]) -> Result<(), GeneratorError> {
        SystemRandom::new()
            .fill(bytes)
            .map_err(|_| GeneratorError::Randomness)
    }
}

/// How many characters of each class go into a password.
#[derive(Debug, Clone)]
pub struct GenPolicy {
    pub letters: RangeInclusive<usize>,
    pub digits: RangeInclusive<usize>,
    pub symbols: RangeInclusive<usize>,
}

impl Default for GenPolicy {
    fn default() -> Self {
        Self {
            letters: 10..=16,
            digits: 10..=16,
            symbols: 5..=11,
        }
    }
}

impl GenPolicy {
    pub fn min_len(&self) -> usize {
        self.letters.start() + self.digits.start() + self.symbols.start()
    }

    pub fn max_len(&self) -> usize {
        self.letters.end() + self.digits.end() + self.symbols.end()
    }
}

pub trait PasswordGenerator: Send + Sync {
    fn generate(&self) -> Result<String, GeneratorError>;
}

pub struct DefaultPasswordGenerator {
    rng: Arc<dyn Rng>,
    alphabets: Alphabets,
    policy: GenPolicy,
}

impl DefaultPasswordGenerator {
    pub fn new(rng: Arc<dyn Rng>, alphabets: Alphabets) -> Self {
        Self {
            rng,
            alphabets,
            policy: GenPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: GenPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl PasswordGenerator for DefaultPasswordGenerator {
    fn generate(&self) -> Result<String, GeneratorError> {
        let classes: [(&'static str, &[char], &RangeInclusive<usize>); 3] = [
            ("letters", &self.alphabets.letters, &self.policy.letters),
            ("digits", &self.alphabets.digits, &self.policy.digits),
            ("symbols", &self.alphabets.symbols, &self.policy.symbols),
        ];

        let mut out: Vec<char> = Vec::with_capacity(self.policy.max_len());
        for (name, alphabet, range) in classes {
            if alphabet.is_empty() {
                return Err(GeneratorError::EmptyAlphabet(name));
            }
            if range.is_empty() {
                return Err(GeneratorError::EmptyRange(name));
            }
            let count = uniform_in_range(&*self.rng, range)?;
            for _ in 0..count {
                out.push(alphabet[uniform_index(&*self.rng, alphabet.len())?]);
            }
        }

        fy_shuffle(&*self.rng, &mut out)?;
        Ok(out.into_iter().collect())
    }
}

fn uniform_index(rng: &dyn Rng, len: usize) -> Result<usize, GeneratorError> {
    // Rejection sampling on u32 space
    let n = len as u32;
    let zone = (u32::MAX / n) * n;
    loop {
        let mut b = [0u8; 4];
        rng.fill(&mut b)?;
        let x = u32::from_le_bytes(b);
        if x < zone {
            return Ok((x % n) as usize);
        }
    }
}

fn uniform_in_range(rng: &dyn Rng, range: &RangeInclusive<usize>) -> Result<usize, GeneratorError> {
    let span = range.end() - range.start() + 1;
    Ok(range.start() + uniform_index(rng, span)?)
}

fn fy_shuffle<T>(rng: &dyn Rng, data: &mut [T]) -> Result<(), GeneratorError> {
    if data.len() <= 1 {
        return Ok(());
    }
    for i in (1..data.len()).rev() {
        let j = uniform_index(rng, i + 1)?;
        data.swap(i, j);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MockRng {
        data: Mutex<Vec<u8>>,
    }
    impl MockRng {
        fn new(seq: &[u8]) -> Self {
            Self {
                data: Mutex::new(seq.to_vec()),
            }
        }
    }
    impl Rng for MockRng {
        fn fill(&self, bytes: &mut [u8]) -> Result<(), GeneratorError> {
            let mut guard = self.data.lock().unwrap();
            if guard.is_empty() {
                *guard = vec![0u8; 1024];
            }
            for b in bytes.iter_mut() {
                let v = guard.remove(0);
                *b = v;
                guard.push(v.wrapping_add(1));
            }
            Ok(())
        }
    }

    struct ZeroRng;
    impl Rng for ZeroRng {
        fn fill(&self, bytes: &mut [u8]) -> Result<(), GeneratorError> {
            bytes.fill(0);
            Ok(())
        }
    }

    #[test]
    fn draws_only_from_configured_alphabets() {
        let rng = Arc::new(MockRng::new(&[1, 2, 3, 4, 5, 6, 7, 8]));
        let gen = DefaultPasswordGenerator::new(rng, Alphabets::new("ab", "7", "?"));
        let s = gen.generate().unwrap();
        assert!(s.chars().all(|c| "ab7?".contains(c)));
        let len = s.chars().count();
        assert!((25..=43).contains(&len), "length {len}");
    }

    #[test]
    fn zero_randomness_yields_minimum_counts() {
        let gen = DefaultPasswordGenerator::new(Arc::new(ZeroRng), Alphabets::new("a", "1", "#"));
        let s = gen.generate().unwrap();
        assert_eq!(s.chars().filter(|&c| c == 'a').count(), 10);
        assert_eq!(s.chars().filter(|&c| c == '1').count(), 10);
        assert_eq!(s.chars().filter(|&c| c == '#').count(), 5);
    }

    #[test]
    fn custom_policy_is_honoured() {
        let policy = GenPolicy {
            letters: 2..=2,
            digits: 3..=3,
            symbols: 1..=1,
        };
        let gen = DefaultPasswordGenerator::new(Arc::new(SystemRng), Alphabets::default())
            .with_policy(policy);
        let s = gen.generate().unwrap();
        assert_eq!(s.chars().count(), 6);
        assert_eq!(s.chars().filter(|c| c.is_ascii_digit()).count(), 3);
    }

    #[test]
    fn empty_alphabet_rejected() {
        let gen = DefaultPasswordGenerator::new(Arc::new(SystemRng), Alphabets::new("abc", "", "!"));
        assert!(matches!(
            gen.generate(),
            Err(GeneratorError::EmptyAlphabet("digits"))
        ));
    }

    #[test]
    fn inverted_range_rejected() {
        #[allow(clippy::reversed_empty_ranges)]
        let policy = GenPolicy {
            symbols: 5..=1,
            ..GenPolicy::default()
        };
        let gen =
            DefaultPasswordGenerator::new(Arc::new(SystemRng), Alphabets::default()).with_policy(policy);
        assert!(matches!(gen.generate(), Err(GeneratorError::EmptyRange("symbols"))));
    }

    #[test]
    fn shuffle_keeps_multiset() {
        let rng = MockRng::new(&[9, 200, 13, 77]);
        let mut v: Vec<u32> = (0..20).collect();
        fy_shuffle(&rng, &mut v).unwrap();
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
