//! Character classes a generated password may draw from.
//!
//! Each class maps to a fixed, disjoint alphabet of printable ASCII.

use std::fmt;

/// A named subset of printable ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum CharClass {
    /// `A`–`Z`
    #[value(name = "upper")]
    Uppercase,
    /// `a`–`z`
    #[value(name = "lower")]
    Lowercase,
    /// `0`–`9`
    #[value(name = "digit")]
    Digits,
    /// The 32 ASCII punctuation characters (codes 33–47, 58–64, 91–96, 123–126).
    #[value(name = "punct")]
    Punctuation,
}

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

impl CharClass {
    /// Every class, in a stable order.
    pub const ALL: [CharClass; 4] = [
        CharClass::Uppercase,
        CharClass::Lowercase,
        CharClass::Digits,
        CharClass::Punctuation,
    ];

    /// The fixed alphabet of this class.
    pub fn alphabet(self) -> &'static str {
        match self {
            CharClass::Uppercase => UPPERCASE,
            CharClass::Lowercase => LOWERCASE,
            CharClass::Digits => DIGITS,
            CharClass::Punctuation => PUNCTUATION,
        }
    }

    pub fn contains(self, ch: char) -> bool {
        match self {
            CharClass::Uppercase => ch.is_ascii_uppercase(),
            CharClass::Lowercase => ch.is_ascii_lowercase(),
            CharClass::Digits => ch.is_ascii_digit(),
            CharClass::Punctuation => ch.is_ascii_punctuation(),
        }
    }

    /// The class `ch` belongs to, if any.
    pub fn of(ch: char) -> Option<CharClass> {
        Self::ALL.into_iter().find(|class| class.contains(ch))
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharClass::Uppercase => "upper",
            CharClass::Lowercase => "lower",
            CharClass::Digits => "digit",
            CharClass::Punctuation => "punct",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii_range(from: u8, to: u8) -> String {
        (from..=to).map(char::from).collect()
    }

    #[test]
    fn uppercase_alphabet() {
        assert_eq!(CharClass::Uppercase.alphabet(), "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }

    #[test]
    fn lowercase_alphabet() {
        assert_eq!(CharClass::Lowercase.alphabet(), "abcdefghijklmnopqrstuvwxyz");
    }

    #[test]
    fn digit_alphabet() {
        assert_eq!(CharClass::Digits.alphabet(), "0123456789");
    }

    #[test]
    fn punctuation_alphabet_matches_ascii_ranges() {
        let expected = ascii_range(33, 47) + &ascii_range(58, 64) + &ascii_range(91, 96)
            + &ascii_range(123, 126);
        assert_eq!(CharClass::Punctuation.alphabet(), expected);
        assert_eq!(CharClass::Punctuation.alphabet().len(), 32);
    }

    #[test]
    fn contains_agrees_with_alphabet() {
        for class in CharClass::ALL {
            for ch in (0u8..=127).map(char::from) {
                assert_eq!(
                    class.contains(ch),
                    class.alphabet().contains(ch),
                    "{class} disagrees on {ch:?}"
                );
            }
        }
    }

    #[test]
    fn classes_are_disjoint() {
        for class in CharClass::ALL {
            for ch in class.alphabet().chars() {
                assert_eq!(CharClass::of(ch), Some(class));
            }
        }
        assert_eq!(CharClass::of(' '), None);
    }
}
