//! Seeding the generator from user keystrokes.
//!
//! The user types a fixed number of arbitrary characters.  Consecutive
//! pairs of character codes are XOR-ed and the results' decimal digits
//! concatenated; that number (trimmed from the right until it fits in a
//! `u64`) is XOR-ed with the nanoseconds elapsed since the prompt
//! started, so typing rhythm contributes as well.

use std::time::Instant;

/// Number of keystrokes collected by default.
pub const SEED_INPUT_LEN: usize = 16;

/// Collects keystrokes and turns them into a generator seed.
#[derive(Debug, Clone)]
pub struct SeedMixer {
    started: Instant,
    required: usize,
    input: String,
}

impl Default for SeedMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedMixer {
    /// Start collecting [`SEED_INPUT_LEN`] keystrokes.  The clock starts now.
    pub fn new() -> Self {
        Self::with_len(SEED_INPUT_LEN)
    }

    pub fn with_len(required: usize) -> Self {
        Self {
            started: Instant::now(),
            required,
            input: String::with_capacity(required),
        }
    }

    /// Record one keystroke.  Returns `true` once enough have been typed;
    /// further keystrokes are ignored.
    pub fn push(&mut self, ch: char) -> bool {
        if !self.is_complete() {
            self.input.push(ch);
        }
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.input.chars().count() >= self.required
    }

    pub fn remaining(&self) -> usize {
        self.required.saturating_sub(self.input.chars().count())
    }

    /// The seed, once all keystrokes are in.
    pub fn seed(&self) -> Option<u64> {
        if !self.is_complete() {
            return None;
        }
        let nanos = u64::try_from(self.started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        Some(derive_seed(&self.input, nanos))
    }
}

/// XOR the keystroke number of `input` with `clock_nanos`.
pub fn derive_seed(input: &str, clock_nanos: u64) -> u64 {
    parse_trimmed(&pair_digits(input)) ^ clock_nanos
}

/// Decimal digits of `c0^c1`, `c2^c3`, … concatenated.  A trailing odd
/// character has no partner and is ignored.
pub fn pair_digits(input: &str) -> String {
    let codes: Vec<u32> = input.chars().map(u32::from).collect();
    codes
        .chunks_exact(2)
        .map(|pair| (pair[0] ^ pair[1]).to_string())
        .collect()
}

/// Parse a digit string as `u64`, dropping trailing digits until it
/// fits.  The empty string is `0`.
pub fn parse_trimmed(digits: &str) -> u64 {
    let mut end = digits.len();
    while end > 0 {
        if let Ok(value) = digits[..end].parse::<u64>() {
            return value;
        }
        end -= 1;
    }
    0
}
