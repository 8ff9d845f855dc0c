//! The static description of a puzzle: which cells are open, which slots they form, and where the
//! slots cross.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

use log::debug;
use smallvec::SmallVec;

use crate::word_list::WordList;
use crate::{Error, Result, MAX_SLOT_COUNT, MAX_SLOT_LENGTH};

/// The character marking an open cell in a structure file. Anything else is a block.
pub const OPEN_CELL: char = '_';

/// An identifier for a given variable, based on its index in the Crossword's `variables` field.
pub type VarId = usize;

/// Zero-indexed (row, column) coords for a cell in the grid, where row = 0 is the top row.
pub type GridCoord = (usize, usize);

/// Pair of cell indices `(ix, iy)` at which two variables must agree.
pub type Overlap = (usize, usize);

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Across,
    Down,
}

/// A slot in the grid that needs exactly one word. Two variables are the same slot if they start
/// at the same cell facing the same way; the length follows from the grid.
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Variable {
        Variable { row, col, direction, length }
    }

    /// Generate the coords for each cell of this variable.
    pub fn cell_coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.length).map(move |cell_idx| match self.direction {
            Direction::Across => (self.row, self.col + cell_idx),
            Direction::Down => (self.row + cell_idx, self.col),
        })
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        (self.row, self.col, self.direction) == (other.row, other.col, other.direction)
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.row, self.col, self.direction).hash(state);
    }
}

/// A crossing between one variable and another, referencing the other variable's id and the
/// location of the intersection within the other variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub other_var_id: VarId,
    pub other_cell: usize,
}

/// A struct representing the aspects of a puzzle that are static during solving.
pub struct Crossword {
    height: usize,
    width: usize,
    structure: Vec<Vec<bool>>,
    words: WordList,
    variables: SmallVec<[Variable; MAX_SLOT_COUNT]>,

    /// For each variable, one entry per cell: the variable crossing it there, if any.
    crossings: Vec<SmallVec<[Option<Crossing>; MAX_SLOT_LENGTH]>>,

    /// For each variable, the ids of every variable it crosses, in cell order.
    neighbors: Vec<SmallVec<[VarId; MAX_SLOT_LENGTH]>>,
}

impl Debug for Crossword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crossword")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("variables", &self.variables)
            .field("words", &(["(", &self.words.len().to_string(), " entries)"].join("")))
            .finish()
    }
}

impl Crossword {
    /// Build a crossword from a structure template, with `_` representing open cells and any other
    /// character representing blocks. Rows shorter than the longest row are padded with blocks.
    pub fn new(structure: &str, words: WordList) -> Result<Crossword> {
        let rows: Vec<Vec<bool>> = structure
            .lines()
            .map(|line| line.trim_end_matches('\r').chars().map(|c| c == OPEN_CELL).collect())
            .collect();

        if rows.is_empty() {
            return Err(Error::EmptyStructure);
        }
        if words.is_empty() {
            return Err(Error::EmptyWordList);
        }

        let height = rows.len();
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let structure: Vec<Vec<bool>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();

        let variables = build_variables(&structure);
        if variables.is_empty() {
            return Err(Error::NoSlots);
        }

        let crossings = build_crossings(&variables);
        let neighbors: Vec<SmallVec<[VarId; MAX_SLOT_LENGTH]>> = crossings
            .iter()
            .map(|cells| cells.iter().flatten().map(|crossing| crossing.other_var_id).collect())
            .collect();

        debug!(
            target: "crossword",
            "{}x{} grid with {} variables and {} candidate words",
            height,
            width,
            variables.len(),
            words.len(),
        );

        Ok(Crossword {
            height,
            width,
            structure,
            words,
            variables,
            crossings,
            neighbors,
        })
    }

    /// Load a structure file and a words file.
    pub fn load(structure_path: impl AsRef<Path>, words_path: impl AsRef<Path>) -> Result<Crossword> {
        let structure_path = structure_path.as_ref();
        let structure =
            fs::read_to_string(structure_path).map_err(|err| Error::io(structure_path, err))?;

        Crossword::new(&structure, WordList::load(words_path)?)
    }

    /// Build a square grid with no blocks.
    pub fn square(size: usize, words: WordList) -> Result<Crossword> {
        let row: String = (0..size).map(|_| OPEN_CELL).collect();
        let structure: Vec<&str> = (0..size).map(|_| row.as_str()).collect();

        Crossword::new(&structure.join("\n"), words)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.structure
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, var_id: VarId) -> &Variable {
        &self.variables[var_id]
    }

    pub fn variable_id(&self, variable: &Variable) -> Option<VarId> {
        self.variables.iter().position(|v| v == variable)
    }

    /// For each cell of `var_id`, the variable crossing it there, if any.
    pub fn crossings(&self, var_id: VarId) -> &[Option<Crossing>] {
        &self.crossings[var_id]
    }

    /// The cell indices at which `x` and `y` must agree, or `None` if they don't share a cell.
    pub fn overlap(&self, x: VarId, y: VarId) -> Option<Overlap> {
        self.crossings(x)
            .iter()
            .enumerate()
            .find_map(|(cell_idx, crossing)| match crossing {
                Some(crossing) if crossing.other_var_id == y => {
                    Some((cell_idx, crossing.other_cell))
                }
                _ => None,
            })
    }

    pub fn neighbors(&self, var_id: VarId) -> &[VarId] {
        &self.neighbors[var_id]
    }

    pub fn degree(&self, var_id: VarId) -> usize {
        self.neighbors[var_id].len()
    }
}

/// Scan the grid for maximal runs of two or more open cells. Cells are visited row by row; a down
/// slot starting at a cell comes before an across slot starting at the same cell.
fn build_variables(structure: &[Vec<bool>]) -> SmallVec<[Variable; MAX_SLOT_COUNT]> {
    let height = structure.len();
    let width = structure.first().map(|row| row.len()).unwrap_or(0);
    let open = |row: usize, col: usize| row < height && col < width && structure[row][col];

    let mut variables: SmallVec<[Variable; MAX_SLOT_COUNT]> = SmallVec::new();

    for row in 0..height {
        for col in 0..width {
            if !open(row, col) {
                continue;
            }

            if row == 0 || !open(row - 1, col) {
                let length = (row..height).take_while(|&r| open(r, col)).count();
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Down, length));
                }
            }

            if col == 0 || !open(row, col - 1) {
                let length = (col..width).take_while(|&c| open(row, c)).count();
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Across, length));
                }
            }
        }
    }

    variables
}

/// Build a map from cell location to the variables using it, then turn that into per-cell
/// crossings for each variable.
fn build_crossings(variables: &[Variable]) -> Vec<SmallVec<[Option<Crossing>; MAX_SLOT_LENGTH]>> {
    // (variable id, cell index within variable)
    let mut entries_by_loc: HashMap<GridCoord, SmallVec<[(VarId, usize); 2]>> = HashMap::new();

    for (var_id, variable) in variables.iter().enumerate() {
        for (cell_idx, loc) in variable.cell_coords().enumerate() {
            entries_by_loc.entry(loc).or_default().push((var_id, cell_idx));
        }
    }

    variables
        .iter()
        .enumerate()
        .map(|(var_id, variable)| {
            variable
                .cell_coords()
                .map(|loc| {
                    entries_by_loc[&loc]
                        .iter()
                        .find(|&&(other, _)| other != var_id)
                        .map(|&(other_var_id, other_cell)| Crossing { other_var_id, other_cell })
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Crossing, Crossword, Direction, Variable};
    use crate::word_list::WordList;
    use crate::Error;

    fn words() -> WordList {
        WordList::parse("one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\nten")
    }

    /// #___#
    /// #_##_
    /// #_##_
    /// #_##_
    /// #____
    fn structure0() -> Crossword {
        Crossword::new("#___#\n#_##_\n#_##_\n#_##_\n#____\n", words()).expect("valid structure")
    }

    #[test]
    fn test_variables_are_found_in_scan_order() {
        let crossword = structure0();

        assert_eq!(
            crossword.variables(),
            &[
                Variable::new(0, 1, Direction::Down, 5),
                Variable::new(0, 1, Direction::Across, 3),
                Variable::new(1, 4, Direction::Down, 4),
                Variable::new(4, 1, Direction::Across, 4),
            ]
        );
        assert_eq!(crossword.variables()[0].length, 5);
        assert_eq!(crossword.variables()[3].length, 4);
    }

    #[test]
    fn test_overlaps_are_symmetric() {
        let crossword = structure0();

        assert_eq!(crossword.overlap(0, 1), Some((0, 0)));
        assert_eq!(crossword.overlap(0, 3), Some((4, 0)));
        assert_eq!(crossword.overlap(3, 0), Some((0, 4)));
        assert_eq!(crossword.overlap(2, 3), Some((3, 3)));
        assert_eq!(crossword.overlap(1, 2), None);
        assert_eq!(crossword.overlap(1, 1), None);

        for x in 0..crossword.variable_count() {
            for y in 0..crossword.variable_count() {
                let flipped = crossword.overlap(y, x).map(|(iy, ix)| (ix, iy));
                assert_eq!(crossword.overlap(x, y), flipped);
            }
        }
    }

    #[test]
    fn test_crossings_by_cell() {
        let crossword = structure0();

        assert_eq!(
            crossword.crossings(0),
            &[
                Some(Crossing { other_var_id: 1, other_cell: 0 }),
                None,
                None,
                None,
                Some(Crossing { other_var_id: 3, other_cell: 0 }),
            ]
        );
        assert_eq!(
            crossword.crossings(2),
            &[None, None, None, Some(Crossing { other_var_id: 3, other_cell: 3 })]
        );
    }

    #[test]
    fn test_neighbors() {
        let crossword = structure0();

        assert_eq!(crossword.neighbors(0), &[1, 3]);
        assert_eq!(crossword.neighbors(1), &[0]);
        assert_eq!(crossword.neighbors(2), &[3]);
        assert_eq!(crossword.neighbors(3), &[0, 2]);
        assert_eq!(crossword.degree(3), 2);
    }

    #[test]
    fn test_variable_identity_ignores_length() {
        let crossword = structure0();

        assert_eq!(crossword.variable_id(&Variable::new(4, 1, Direction::Across, 0)), Some(3));
        assert_eq!(crossword.variable_id(&Variable::new(4, 1, Direction::Down, 4)), None);
    }

    #[test]
    fn test_ragged_rows_are_padded_with_blocks() {
        let crossword = Crossword::new("___\n_\n_", words()).expect("valid structure");

        assert_eq!(crossword.width(), 3);
        assert!(crossword.is_open(0, 2));
        assert!(!crossword.is_open(1, 2));
        assert!(!crossword.is_open(5, 5));
        assert_eq!(crossword.variable_count(), 2);
    }

    #[test]
    fn test_square() {
        let crossword = Crossword::square(3, words()).expect("valid structure");

        assert_eq!(crossword.variable_count(), 6);
        for var_id in 0..6 {
            assert_eq!(crossword.degree(var_id), 3);
        }
    }

    #[test]
    fn test_structure_errors() {
        assert!(matches!(Crossword::new("", words()), Err(Error::EmptyStructure)));
        assert!(matches!(Crossword::new("_#_\n#_#", words()), Err(Error::NoSlots)));
        assert!(matches!(Crossword::new("___", WordList::default()), Err(Error::EmptyWordList)));
    }
}
