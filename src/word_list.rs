//! The vocabulary a crossword is filled from.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use log::debug;
use smallvec::SmallVec;

use crate::{Error, Result, MAX_SLOT_LENGTH};

/// An identifier for a given word, based on its index in the `WordList`.
pub type WordId = usize;

/// A struct representing a word that can be chosen for a given slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub string: String,
    pub glyphs: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    fn new(string: String) -> Word {
        let glyphs = string.chars().collect();
        Word { string, glyphs }
    }

    /// Length in characters, which is what slot lengths are measured in.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Upper-cased, de-duplicated words in sorted order. Sorting keeps `WordId`s (and therefore every
/// tie-break in the solver) independent of the order of the input file.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<Word>,
}

impl WordList {
    /// Build a word list from file contents with one word per line. Blank lines are skipped.
    pub fn parse(contents: &str) -> WordList {
        let unique: BTreeSet<String> = contents
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.to_uppercase())
            .collect();

        WordList {
            words: unique.into_iter().map(Word::new).collect(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<WordList> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        let word_list = WordList::parse(&contents);

        if word_list.is_empty() {
            return Err(Error::EmptyWordList);
        }
        debug!(target: "crossword", "loaded {} words from {}", word_list.len(), path.display());

        Ok(word_list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    pub fn find(&self, string: &str) -> Option<WordId> {
        let string = string.to_uppercase();
        self.words
            .binary_search_by(|word| word.string.as_str().cmp(&string))
            .ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &Word)> {
        self.words.iter().enumerate()
    }
}

impl<'a> FromIterator<&'a str> for WordList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let contents: Vec<&str> = iter.into_iter().collect();
        WordList::parse(&contents.join("\n"))
    }
}
