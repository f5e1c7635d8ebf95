//! The word list enemies draw their labels from.

use std::path::Path;

use tracing::info;

use crate::error::ResourceError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WordBank {
    words: Vec<String>,
}

impl WordBank {
    /// Read a newline-delimited list.  Lines are trimmed and blanks dropped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ResourceError::from_io(path.to_path_buf(), e))?;
        let bank = Self::from_text(&text);
        if bank.is_empty() {
            return Err(ResourceError::EmptyWordList {
                path: path.to_path_buf(),
            });
        }
        info!(path = %path.display(), words = bank.len(), "word list loaded");
        Ok(bank)
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        WordBank { words }
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
