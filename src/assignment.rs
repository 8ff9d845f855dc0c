//! Partial and complete assignments of words to variables, and the checks that keep them valid.

use std::collections::{HashMap, HashSet};

use crate::crossword::{Crossword, VarId, Variable};
use crate::word_list::WordId;

/// A struct recording a variable assignment made during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub var_id: VarId,
    pub word_id: WordId,
}

/// A mapping from variables to words, indexed by `VarId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    word_ids: Vec<Option<WordId>>,
    len: usize,
}

impl Assignment {
    /// An empty assignment for a puzzle with `variable_count` variables.
    pub fn new(variable_count: usize) -> Assignment {
        Assignment {
            word_ids: vec![None; variable_count],
            len: 0,
        }
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, var_id: VarId) -> Option<WordId> {
        self.word_ids[var_id]
    }

    pub fn contains(&self, var_id: VarId) -> bool {
        self.word_ids[var_id].is_some()
    }

    /// Assign a word, returning the word previously assigned to the variable, if any.
    pub fn assign(&mut self, var_id: VarId, word_id: WordId) -> Option<WordId> {
        let previous = self.word_ids[var_id].replace(word_id);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    pub fn unassign(&mut self, var_id: VarId) -> Option<WordId> {
        let previous = self.word_ids[var_id].take();
        if previous.is_some() {
            self.len -= 1;
        }
        previous
    }

    /// The assigned variables in `VarId` order.
    pub fn choices(&self) -> impl Iterator<Item = Choice> + '_ {
        self.word_ids
            .iter()
            .enumerate()
            .filter_map(|(var_id, word_id)| word_id.map(|word_id| Choice { var_id, word_id }))
    }

    /// Resolve ids into the variables and words they stand for.
    pub fn to_map(&self, crossword: &Crossword) -> HashMap<Variable, String> {
        self.choices()
            .map(|Choice { var_id, word_id }| {
                (
                    *crossword.variable(var_id),
                    crossword.words().get(word_id).string.clone(),
                )
            })
            .collect()
    }
}

/// Does the assignment give every variable a word?
pub fn is_complete(assignment: &Assignment, variable_count: usize) -> bool {
    assignment.len() == variable_count
}

/// Check that no word is used twice, every word fits its variable, and every pair of assigned
/// neighbors agrees at their shared cell.
pub fn is_consistent(crossword: &Crossword, assignment: &Assignment) -> bool {
    let words = crossword.words();
    let mut used: HashSet<WordId> = HashSet::with_capacity(assignment.len());

    for Choice { var_id, word_id } in assignment.choices() {
        if !used.insert(word_id) {
            return false;
        }

        let word = words.get(word_id);
        if word.len() != crossword.variable(var_id).length {
            return false;
        }

        for &neighbor in crossword.neighbors(var_id) {
            let Some(neighbor_word_id) = assignment.get(neighbor) else {
                continue;
            };
            let Some((cell, neighbor_cell)) = crossword.overlap(var_id, neighbor) else {
                continue;
            };

            if word.glyphs[cell] != words.get(neighbor_word_id).glyphs[neighbor_cell] {
                return false;
            }
        }
    }

    true
}
