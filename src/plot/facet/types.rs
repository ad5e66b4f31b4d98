//! Grid layout for multi-panel figures
//!
//! Panels are placed row-major from the top-left cell.

use serde::{Deserialize, Serialize};

use crate::{Result, SynthplotError};

/// Largest number of cells a figure grid may have
pub const MAX_CELLS: usize = 1024;

/// Rows x columns panel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self { rows: 1, cols: 1 }
    }
}

impl Layout {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let layout = Self { rows, cols };
        layout.validate()?;
        Ok(layout)
    }

    /// Smallest grid with at most three columns that fits `panels`
    pub fn auto(panels: usize) -> Self {
        let panels = panels.max(1);
        let cols = panels.min(3);
        Self {
            rows: panels.div_ceil(cols),
            cols,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SynthplotError::ConfigError(format!(
                "Grid layout needs at least one row and one column, got {}x{}",
                self.rows, self.cols
            )));
        }
        match self.rows.checked_mul(self.cols) {
            Some(cells) if cells <= MAX_CELLS => Ok(()),
            _ => Err(SynthplotError::ConfigError(format!(
                "Grid layout {}x{} exceeds {} cells",
                self.rows, self.cols, MAX_CELLS
            ))),
        }
    }

    /// Number of cells; saturates for layouts that fail validation
    pub fn capacity(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// `(row, col)` of the panel at `index`
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Cells for `count` panels, in placement order.
    ///
    /// Fails when the grid is empty or holds fewer cells than panels.
    pub fn place(&self, count: usize) -> Result<Vec<(usize, usize)>> {
        self.validate()?;
        if count > self.capacity() {
            return Err(SynthplotError::ConfigError(format!(
                "{} panels do not fit a {}x{} grid ({} cells)",
                count,
                self.rows,
                self.cols,
                self.capacity()
            )));
        }
        Ok((0..count).map(|i| self.cell(i)).collect())
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_place_row_major() {
        let layout = Layout::new(2, 3).unwrap();
        let cells = layout.place(4).unwrap();
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(Layout::new(0, 3).is_err());
        assert!(Layout { rows: 2, cols: 0 }.place(0).is_err());
    }

    #[test]
    fn test_overfull_grid_rejected() {
        let err = Layout::default().place(2).unwrap_err();
        assert!(matches!(err, SynthplotError::ConfigError(_)));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let huge = Layout {
            rows: 1 << 32,
            cols: 1 << 32,
        };
        assert!(matches!(huge.validate(), Err(SynthplotError::ConfigError(_))));
        assert!(matches!(huge.place(1), Err(SynthplotError::ConfigError(_))));
        assert_eq!(huge.capacity(), usize::MAX);

        assert!(Layout::new(32, 32).is_ok());
        assert!(Layout::new(33, 32).is_err());
        assert!(Layout::new(1, MAX_CELLS + 1).is_err());
    }

    #[test]
    fn test_auto_layout() {
        assert_eq!(Layout::auto(1), Layout { rows: 1, cols: 1 });
        assert_eq!(Layout::auto(4), Layout { rows: 2, cols: 3 });
        assert_eq!(Layout::auto(12), Layout { rows: 4, cols: 3 });
    }

    proptest! {
        #[test]
        fn prop_placement_fills_row_major(
            rows in 1usize..8,
            cols in 1usize..8,
            extra in 0usize..5,
        ) {
            let layout = Layout { rows, cols };
            let capacity = layout.capacity();
            for count in 0..=capacity {
                let cells = layout.place(count).unwrap();
                prop_assert_eq!(cells.len(), count);
                for (i, (r, c)) in cells.iter().enumerate() {
                    prop_assert_eq!(r * cols + c, i);
                }
            }
            prop_assert!(layout.place(capacity + 1 + extra).is_err());
        }
    }
}
