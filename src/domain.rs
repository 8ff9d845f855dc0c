//! Candidate words for each variable.

use bit_set::BitSet;

use crate::crossword::{Crossword, VarId};
use crate::word_list::WordId;

/// The words still permissible for each variable, as one set of `WordId`s per `VarId`. Cloning is
/// how the search takes a snapshot before propagating a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    sets: Vec<BitSet>,
}

impl Domains {
    /// Enforce node consistency: every variable starts with exactly the words of its length.
    pub fn initialize(crossword: &Crossword) -> Domains {
        let words = crossword.words();

        let sets = crossword
            .variables()
            .iter()
            .map(|variable| {
                let mut set = BitSet::with_capacity(words.len());
                for (word_id, word) in words.iter() {
                    if word.len() == variable.length {
                        set.insert(word_id);
                    }
                }
                set
            })
            .collect();

        Domains { sets }
    }

    pub fn len(&self, var_id: VarId) -> usize {
        self.sets[var_id].len()
    }

    pub fn is_empty(&self, var_id: VarId) -> bool {
        self.sets[var_id].is_empty()
    }

    pub fn contains(&self, var_id: VarId, word_id: WordId) -> bool {
        self.sets[var_id].contains(word_id)
    }

    /// The remaining word ids for a variable, in ascending order.
    pub fn values(&self, var_id: VarId) -> impl Iterator<Item = WordId> + '_ {
        self.sets[var_id].iter()
    }

    pub fn remove(&mut self, var_id: VarId, word_id: WordId) -> bool {
        self.sets[var_id].remove(word_id)
    }

    /// Shrink a domain to the single given word. The word must already be in the domain.
    pub fn restrict_to(&mut self, var_id: VarId, word_id: WordId) {
        debug_assert!(self.contains(var_id, word_id));

        let set = &mut self.sets[var_id];
        set.clear();
        set.insert(word_id);
    }

    pub fn is_any_empty(&self) -> bool {
        self.sets.iter().any(|set| set.is_empty())
    }

    /// The number of values across all domains.
    pub fn total_len(&self) -> usize {
        self.sets.iter().map(|set| set.len()).sum()
    }
}
