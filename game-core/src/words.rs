//! Difficulty-tiered word lists and random word selection

use heapless::String;
use rand::Rng;

use crate::error::GameError;
use crate::morse;
use crate::types::Difficulty;

/// Longest word a list may contain
pub const MAX_WORD_LEN: usize = 12;

/// Validated game word: uppercase A-Z/0-9 only
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Word(String<MAX_WORD_LEN>);

impl Word {
    /// Validate and normalize `text` to uppercase
    pub fn parse(text: &str) -> Result<Self, GameError> {
        let mut word = String::new();
        for c in text.chars() {
            if c == ' ' || !morse::is_supported(c) {
                return Err(GameError::InvalidCharacter(c));
            }
            word.push(c.to_ascii_uppercase())
                .map_err(|_| GameError::WordTooLong)?;
        }
        Ok(Self(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact-length, case-insensitive comparison
    pub fn matches(&self, guess: &str) -> bool {
        self.0.eq_ignore_ascii_case(guess)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Word {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

/// Built-in four-letter words
pub const EASY_WORDS: &[&str] = &[
    "CAFE", "FACE", "HAIR", "JADE", "NAAN", "UBER", "ZAPS", "IBEX", "GAWK", "EDGE",
];

/// Built-in five-letter words
pub const MEDIUM_WORDS: &[&str] = &[
    "HEART", "FIFTY", "EIGHT", "MOUNT", "ROUTE", "PRIZE", "UNITY", "WHICH", "YOUTH", "VITAL",
];

/// Built-in six-letter words
pub const HARD_WORDS: &[&str] = &[
    "FABLED", "CASUAL", "EIGHTH", "EMERGE", "ABACUS", "IAMBIC", "VACATE", "WOBBLE", "EAGLET", "DABBED",
];

/// Word lists keyed by difficulty
#[derive(Clone, Copy, Debug)]
pub struct WordBank<'a> {
    lists: [&'a [&'a str]; 3],
}

impl WordBank<'static> {
    /// Bank loaded with the built-in lists
    pub const fn builtin() -> Self {
        Self {
            lists: [EASY_WORDS, MEDIUM_WORDS, HARD_WORDS],
        }
    }
}

impl<'a> WordBank<'a> {
    /// Create a bank after checking every list
    pub fn new(easy: &'a [&'a str], medium: &'a [&'a str], hard: &'a [&'a str]) -> Result<Self, GameError> {
        let bank = Self {
            lists: [easy, medium, hard],
        };
        bank.validate()?;
        Ok(bank)
    }

    /// Every tier non-empty, every word parseable
    pub fn validate(&self) -> Result<(), GameError> {
        for difficulty in Difficulty::ALL {
            let list = self.words(difficulty);
            if list.is_empty() {
                return Err(GameError::EmptyWordList(difficulty));
            }
            for word in list {
                if word.is_empty() {
                    return Err(GameError::InvalidConfig("word lists must not contain empty words"));
                }
                Word::parse(word)?;
            }
        }
        Ok(())
    }

    pub fn words(&self, difficulty: Difficulty) -> &'a [&'a str] {
        self.lists[difficulty.index()]
    }

    pub fn contains(&self, difficulty: Difficulty, word: &Word) -> bool {
        self.words(difficulty).iter().any(|w| word.matches(w))
    }

    /// Pick a word uniformly from the tier using the caller's random source
    pub fn pick_word<R: Rng + ?Sized>(&self, difficulty: Difficulty, rng: &mut R) -> Result<Word, GameError> {
        let list = self.words(difficulty);
        if list.is_empty() {
            return Err(GameError::EmptyWordList(difficulty));
        }
        let index = rng.gen_range(0..list.len());
        Word::parse(list[index])
    }
}

impl Default for WordBank<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}
