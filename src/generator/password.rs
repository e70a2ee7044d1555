//! Random passwords constrained to a set of character classes.
//!
//! The generator draws a candidate uniformly from the union of the
//! requested alphabets, then repairs it until every requested class
//! appears at least once: each missing class overwrites one random
//! position and the whole candidate is reshuffled.

use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::charset::CharClass;
use crate::errors::{PassVaultError, Result};

/// Generates passwords from a random source it owns.
///
/// `PasswordGenerator::new()` uses the thread-local generator and is not
/// reproducible; `PasswordGenerator::with_seed(n)` yields the same
/// sequence of passwords for the same seed and parameters.  An instance
/// is meant for one thread at a time.
pub struct PasswordGenerator<R = ThreadRng> {
    rng: R,
}

impl PasswordGenerator<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for PasswordGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordGenerator<StdRng> {
    /// A fully reproducible generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> PasswordGenerator<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a password whose length lies in `[low, high]` and which
    /// contains at least one character of every class in `classes`.
    ///
    /// Duplicate classes count once.  Fails before drawing anything if
    /// `classes` is empty, `low > high`, or `high` is shorter than the
    /// number of classes.  When only `low` is too short, the length is
    /// drawn from `[classes.len(), high]` instead.
    pub fn generate(&mut self, low: usize, high: usize, classes: &[CharClass]) -> Result<String> {
        let classes = distinct(classes);
        if classes.is_empty() {
            return Err(PassVaultError::NoCharClasses);
        }
        if low > high {
            return Err(PassVaultError::InvalidLengthRange { low, high });
        }
        if high < classes.len() {
            return Err(PassVaultError::GeneratorPrecondition {
                length: high,
                classes: classes.len(),
            });
        }

        let floor = low.max(classes.len());
        let length = if floor == high {
            high
        } else {
            self.rng.random_range(floor..=high)
        };

        let alphabet: Vec<char> = classes
            .iter()
            .flat_map(|class| class.alphabet().chars())
            .collect();

        let mut candidate: Vec<char> = (0..length).map(|_| self.pick(&alphabet)).collect();

        let mut rounds = 0usize;
        loop {
            let missing: Vec<CharClass> = classes
                .iter()
                .copied()
                .filter(|class| !candidate.iter().any(|&ch| class.contains(ch)))
                .collect();
            if missing.is_empty() {
                break;
            }

            rounds += 1;
            for class in missing {
                let position = self.rng.random_range(0..length);
                let class_chars: Vec<char> = class.alphabet().chars().collect();
                candidate[position] = self.pick(&class_chars);
                candidate.shuffle(&mut self.rng);
            }
        }
        trace!(length, repair_rounds = rounds, "generated password");

        Ok(candidate.into_iter().collect())
    }

    fn pick(&mut self, chars: &[char]) -> char {
        chars[self.rng.random_range(0..chars.len())]
    }
}

/// Drop repeated classes, keeping first-seen order.
fn distinct(classes: &[CharClass]) -> Vec<CharClass> {
    let mut out = Vec::with_capacity(classes.len());
    for &class in classes {
        if !out.contains(&class) {
            out.push(class);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_keeps_order() {
        let classes = [
            CharClass::Digits,
            CharClass::Uppercase,
            CharClass::Digits,
        ];
        assert_eq!(distinct(&classes), vec![CharClass::Digits, CharClass::Uppercase]);
    }

    #[test]
    fn duplicate_classes_count_once_for_precondition() {
        let mut generator = PasswordGenerator::with_seed(1);
        let password = generator
            .generate(1, 1, &[CharClass::Digits, CharClass::Digits])
            .unwrap();
        assert_eq!(password.len(), 1);
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn exact_length_equal_to_class_count_uses_each_class_once() {
        let mut generator = PasswordGenerator::with_seed(42);
        for _ in 0..50 {
            let password = generator.generate(4, 4, &CharClass::ALL).unwrap();
            let mut seen: Vec<CharClass> = password.chars().filter_map(CharClass::of).collect();
            seen.sort();
            assert_eq!(seen, CharClass::ALL.to_vec());
        }
    }

    #[test]
    fn short_low_bound_is_raised_to_class_count() {
        let mut generator = PasswordGenerator::with_seed(9);
        for _ in 0..100 {
            let password = generator.generate(0, 5, &CharClass::ALL).unwrap();
            assert!((4..=5).contains(&password.len()));
        }
    }

    #[test]
    fn from_rng_accepts_any_source() {
        let mut generator = PasswordGenerator::from_rng(StdRng::seed_from_u64(3));
        assert_eq!(generator.generate(8, 8, &[CharClass::Lowercase]).unwrap().len(), 8);
    }
}
