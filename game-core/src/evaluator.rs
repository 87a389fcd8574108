use game_types::{GameError, LetterColor, LetterResult};
use std::collections::HashMap;

use crate::vocabulary::normalize_word;

pub struct GuessEvaluator;

impl GuessEvaluator {
    /// Color every letter of `guess` against `target`.
    ///
    /// Both words are uppercased before comparison. Exact matches are resolved
    /// first and consume their letter, then the remaining letters are marked
    /// orange only while unclaimed occurrences of that letter are left in the
    /// target, so a letter is never marked more often than it appears.
    pub fn evaluate(guess: &str, target: &str) -> Result<Vec<LetterResult>, GameError> {
        let guess_chars: Vec<char> = normalize_word(guess).chars().collect();
        let target_chars: Vec<char> = normalize_word(target).chars().collect();

        if guess_chars.len() != target_chars.len() {
            return Err(GameError::InvalidGuessLength {
                expected: target_chars.len() as u32,
                actual: guess_chars.len() as u32,
            });
        }

        // Unclaimed occurrences of each target letter
        let mut remaining: HashMap<char, u32> = HashMap::new();
        for ch in &target_chars {
            *remaining.entry(*ch).or_insert(0) += 1;
        }

        // First pass: greens
        let mut colors = vec![LetterColor::Grey; guess_chars.len()];
        for (i, (&guessed, &wanted)) in guess_chars.iter().zip(&target_chars).enumerate() {
            if guessed == wanted {
                colors[i] = LetterColor::Green;
                if let Some(count) = remaining.get_mut(&guessed) {
                    *count -= 1;
                }
            }
        }

        // Second pass: oranges from whatever is left
        for (i, ch) in guess_chars.iter().enumerate() {
            if colors[i] == LetterColor::Green {
                continue;
            }

            if let Some(count) = remaining.get_mut(ch).filter(|count| **count > 0) {
                colors[i] = LetterColor::Orange;
                *count -= 1;
            }
        }

        Ok(guess_chars
            .into_iter()
            .zip(colors)
            .map(|(letter, color)| LetterResult::new(letter, color))
            .collect())
    }

    /// Case-insensitive exact match.
    pub fn is_exact_match(guess: &str, target: &str) -> bool {
        normalize_word(guess) == normalize_word(target)
    }
}
