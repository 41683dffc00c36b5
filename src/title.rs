//! Project titles: operator-supplied names and random two-word titles.

use crate::error::{Result, ScaffoldError};
use crate::prompt::Confirmer;
use colored::*;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Source of raw dictionary words.
pub trait WordSource {
    /// A random word, or `None` if the source has no words.
    fn word(&mut self) -> Option<String>;
}

pub struct WordList {
    words: Vec<String>,
    rng: fastrand::Rng,
}

impl WordList {
    pub fn new(words: Vec<String>, rng: fastrand::Rng) -> Self {
        Self { words, rng }
    }

    /// Read one word per line. An empty or unreadable file is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ScaffoldError::WordList(format!("cannot read {}: {}", path.display(), e))
        })?;
        let words: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
        if words.is_empty() {
            return Err(ScaffoldError::WordList(format!(
                "{} contains no words",
                path.display()
            )));
        }
        Ok(Self::new(words, fastrand::Rng::new()))
    }
}

impl WordSource for WordList {
    fn word(&mut self) -> Option<String> {
        if self.words.is_empty() {
            return None;
        }
        let idx = self.rng.usize(..self.words.len());
        Some(self.words[idx].clone())
    }
}

/// Keep ASCII letters and digits, lower-cased.
pub fn sanitize_word(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// Words like "'s" sanitize to nothing; give up on sources that only yield those.
const MAX_DRAWS_PER_WORD: usize = 100;

fn draw_word(words: &mut dyn WordSource) -> Result<String> {
    for _ in 0..MAX_DRAWS_PER_WORD {
        let raw = words
            .word()
            .ok_or_else(|| ScaffoldError::WordList("word list is empty".to_string()))?;
        let clean = sanitize_word(&raw);
        if !clean.is_empty() {
            return Ok(clean);
        }
    }
    Err(ScaffoldError::WordList(
        "word list yields no alphanumeric words".to_string(),
    ))
}

/// `word-word`, without asking anyone.
pub fn candidate_title(words: &mut dyn WordSource) -> Result<String> {
    Ok(format!("{}-{}", draw_word(words)?, draw_word(words)?))
}

/// Offer random titles until one is accepted or `max_attempts` run out.
pub fn generate_title(
    words: &mut dyn WordSource,
    confirmer: &mut dyn Confirmer,
    max_attempts: usize,
) -> Result<String> {
    for attempt in 1..=max_attempts {
        let title = candidate_title(words)?;
        tracing::debug!(attempt, %title, "offering title");
        if confirmer.confirm(&format!("Accept title: {}?", title.bold()))? {
            return Ok(title);
        }
    }
    Err(ScaffoldError::TitleNotAccepted(max_attempts))
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("static name pattern is valid")
    })
}

/// Names become a single directory under the location, so no separators.
pub fn validate_name(name: &str) -> Result<()> {
    if name_pattern().is_match(name) {
        Ok(())
    } else {
        Err(ScaffoldError::InvalidName(name.to_string()))
    }
}
