use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeSet;
use std::path::Path;

/// Every target word has exactly this many letters.
pub const WORD_LENGTH: usize = 5;

/// Words seeded into an empty database when no word file is configured.
pub const DEFAULT_WORDS: [&str; 20] = [
    "APPLE", "BRAIN", "CLOUD", "DREAM", "EAGLE", "FROST", "GRAIN", "HEART", "JUMBO", "KNIFE",
    "LEMON", "MAGIC", "OCEAN", "PLANT", "QUICK", "RIVER", "SNAKE", "TABLE", "UNITE", "VOWEL",
];

/// Uppercase form used for storage and comparison.
pub fn normalize_word(word: &str) -> String {
    word.to_uppercase()
}

/// Pick one item uniformly at random.
pub fn pick_uniform<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from a newline separated word list.
    /// Blank lines and `#` comments are skipped, words are uppercased and
    /// anything that is not a 5-letter alphabetic word is dropped.
    pub fn from_word_list(word_list: &str) -> Self {
        let words: BTreeSet<String> = word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(normalize_word)
            .filter(|word| Self::is_well_formed(word))
            .collect();

        Self {
            words: words.into_iter().collect(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;

        let vocabulary = Self::from_word_list(&contents);
        tracing::info!(
            "Loaded {} words from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    pub fn default_words() -> Self {
        Self::from_word_list(&DEFAULT_WORDS.join("\n"))
    }

    /// Check that a word has the target length and only ASCII letters
    pub fn is_well_formed(word: &str) -> bool {
        word.chars().count() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
