// Occupancy grid for the light cycles arena
//
// A cell is either free or blocked by a trail. On the wire the grid is a
// row-major list of integers (0 = free, anything else = blocked by that owner).

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Wire representation of the grid
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GridSnapshot {
    pub width: i32,
    pub height: i32,
    pub cells: Vec<u8>,
}

/// Fixed-size occupancy grid
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "GridSnapshot", into = "GridSnapshot")]
pub struct Grid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl Grid {
    /// Creates an empty grid with every cell free
    ///
    /// # Panics
    /// Panics if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Grid {
            width,
            height,
            blocked: vec![false; (width * height) as usize],
        }
    }

    /// Builds a grid from row-major cell values (0 = free)
    pub fn from_cells(width: i32, height: i32, cells: &[u8]) -> Result<Self, String> {
        if width <= 0 || height <= 0 {
            return Err(format!("Invalid grid dimensions {}x{}", width, height));
        }

        let expected = (width as usize) * (height as usize);
        if cells.len() != expected {
            return Err(format!(
                "Grid {}x{} needs {} cells, got {}",
                width,
                height,
                expected,
                cells.len()
            ));
        }

        Ok(Grid {
            width,
            height,
            blocked: cells.iter().map(|&c| c != 0).collect(),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.blocked.len()
    }

    /// Checks whether a position lies inside the grid
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// In-bounds and not blocked
    pub fn is_free(&self, pos: Position) -> bool {
        self.contains(pos) && !self.blocked[self.index(pos)]
    }

    /// Marks a cell as blocked. Out-of-bounds positions are ignored.
    pub fn block(&mut self, pos: Position) {
        if self.contains(pos) {
            let idx = self.index(pos);
            self.blocked[idx] = true;
        }
    }

    /// Frees a cell again. Only the search uses this, to revert its own moves.
    pub(crate) fn unblock(&mut self, pos: Position) {
        if self.contains(pos) {
            let idx = self.index(pos);
            self.blocked[idx] = false;
        }
    }

    /// Number of free cells on the whole grid
    pub fn free_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| !b).count()
    }

    /// Row-major index; callers must check bounds first
    pub(crate) fn index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = String;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        Grid::from_cells(snapshot.width, snapshot.height, &snapshot.cells)
    }
}

impl From<Grid> for GridSnapshot {
    fn from(grid: Grid) -> Self {
        GridSnapshot {
            width: grid.width,
            height: grid.height,
            cells: grid.blocked.iter().map(|&b| u8::from(b)).collect(),
        }
    }
}
