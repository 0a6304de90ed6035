//! Level catalog
//!
//! Levels are compiled-in 0/1 matrices: `1` places a live brick, `0` leaves
//! the cell empty. Layouts may differ in size; they get denser as play goes on.

use thiserror::Error;

/// A level layout, one slice per row
pub type Layout = &'static [&'static [u8]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The catalog has no level after `current`; the run is won
    #[error("no level after index {current}")]
    NoMoreLevels { current: usize },
    #[error("level index {0} is out of range")]
    OutOfRange(usize),
}

/// The classic opening wall
const LEVEL_1: Layout = &[
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
];

const LEVEL_2: Layout = &[
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 0, 1, 1, 0, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 0, 1, 1, 1, 1, 0, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 0, 0, 1, 1, 1],
];

const LEVEL_3: Layout = &[
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 0, 1, 1, 1, 1, 0, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 0, 1, 1, 0, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
];

const LEVEL_4: Layout = &[
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
];

const STANDARD_LEVELS: &[Layout] = &[LEVEL_1, LEVEL_2, LEVEL_3, LEVEL_4];

/// Ordered list of level layouts
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    layouts: Vec<Layout>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl LevelCatalog {
    /// The built-in progression
    pub fn standard() -> Self {
        Self::new(STANDARD_LEVELS.to_vec())
    }

    pub fn new(layouts: Vec<Layout>) -> Self {
        Self { layouts }
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn layout(&self, index: usize) -> Result<Layout, LevelError> {
        self.layouts
            .get(index)
            .copied()
            .ok_or(LevelError::OutOfRange(index))
    }

    /// Index of the level after `current`, or `NoMoreLevels` at the end
    pub fn next_index(&self, current: usize) -> Result<usize, LevelError> {
        let next = current + 1;
        if next < self.layouts.len() {
            Ok(next)
        } else {
            Err(LevelError::NoMoreLevels { current })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_cells(layout: Layout) -> usize {
        layout
            .iter()
            .map(|row| row.iter().filter(|&&cell| cell == 1).count())
            .sum()
    }

    #[test]
    fn test_standard_catalog_gets_denser() {
        let catalog = LevelCatalog::standard();
        assert_eq!(catalog.len(), 4);
        let counts: Vec<usize> = (0..catalog.len())
            .map(|i| live_cells(catalog.layout(i).unwrap()))
            .collect();
        assert!(counts.windows(2).all(|w| w[0] < w[1]), "{counts:?}");
    }

    #[test]
    fn test_classic_5x8_opens_the_game() {
        let layout = LevelCatalog::standard().layout(0).unwrap();
        assert_eq!(layout.len(), 5);
        assert!(layout.iter().all(|row| row.len() == 8));
        assert_eq!(live_cells(layout), 40);
    }

    #[test]
    fn test_next_index_exhausts() {
        let catalog = LevelCatalog::standard();
        assert_eq!(catalog.next_index(0), Ok(1));
        assert_eq!(catalog.next_index(2), Ok(3));
        assert_eq!(
            catalog.next_index(3),
            Err(LevelError::NoMoreLevels { current: 3 })
        );
    }

    #[test]
    fn test_layout_out_of_range() {
        let catalog = LevelCatalog::standard();
        assert_eq!(catalog.layout(9), Err(LevelError::OutOfRange(9)));
        assert_eq!(
            LevelError::NoMoreLevels { current: 3 }.to_string(),
            "no level after index 3"
        );
    }
}
