pub mod clue;
pub mod normalize;
pub mod random;

pub use clue::{CategoryRef, Clue, RawClueList};
pub use normalize::normalize;
pub use random::{RandomSource, SequenceSource};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub clues: Vec<Clue>,
}

/// A normalized grid of category columns. Only the normalizer builds one, so
/// column length and daily-double limits hold for every value of this type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    pub(crate) fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Tallest column height, used to size the grid.
    pub fn max_rows(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.clues.len())
            .max()
            .unwrap_or(0)
    }

    /// First clue with `id`, scanning columns left to right.
    pub fn find(&self, id: i64) -> Option<&Clue> {
        self.columns
            .iter()
            .flat_map(|c| c.clues.iter())
            .find(|clue| clue.id == id)
    }

    pub fn clue_at(&self, column: usize, row: usize) -> Option<&Clue> {
        self.columns.get(column)?.clues.get(row)
    }

    pub fn daily_double_count(&self) -> usize {
        self.columns
            .iter()
            .flat_map(|c| c.clues.iter())
            .filter(|clue| clue.daily_double)
            .count()
    }
}
