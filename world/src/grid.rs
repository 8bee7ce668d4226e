//! Single-occupancy spatial index that owns every entity position.

use std::collections::BTreeMap;

use warehouse_core::{cardinal_neighbors, CellCoord, GridView, InvariantViolation, ObstacleId, Occupant};

/// Fixed-size, non-toroidal grid holding at most one occupant per cell.
///
/// The grid is the only record of where entities stand. The dense cell vector
/// and the reverse position index are always updated together.
#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Option<Occupant>>,
    positions: BTreeMap<Occupant, CellCoord>,
}

impl Grid {
    /// Creates an empty grid with the provided dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let capacity_u64 = u64::from(width) * u64::from(height);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![None; capacity],
            positions: BTreeMap::new(),
        }
    }

    /// Provides the dimensions of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reports whether `cell` lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.index(cell).is_some()
    }

    /// In-bounds orthogonal neighbours of `cell` in scan order.
    #[must_use]
    pub fn neighbors(&self, cell: CellCoord) -> Vec<CellCoord> {
        cardinal_neighbors(cell, self.width, self.height).collect()
    }

    /// Reports whether `cell` is inside the grid and unoccupied.
    #[must_use]
    pub fn is_empty(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .is_some_and(|index| self.cells[index].is_none())
    }

    /// Returns the occupant recorded at `cell`, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<Occupant> {
        self.index(cell).and_then(|index| self.cells[index])
    }

    /// Returns the cell currently holding `occupant`.
    #[must_use]
    pub fn position(&self, occupant: Occupant) -> Option<CellCoord> {
        self.positions.get(&occupant).copied()
    }

    /// Records `occupant` at `cell`.
    pub fn place(&mut self, occupant: Occupant, cell: CellCoord) -> Result<(), InvariantViolation> {
        if self.positions.contains_key(&occupant) {
            return Err(InvariantViolation::AlreadyPlaced { occupant });
        }
        let index = self.checked_index(cell)?;
        if let Some(existing) = self.cells[index] {
            return Err(InvariantViolation::CellOccupied {
                cell,
                occupant: existing,
            });
        }

        self.cells[index] = Some(occupant);
        let _ = self.positions.insert(occupant, cell);
        Ok(())
    }

    /// Clears the cell holding `occupant` and returns where it stood.
    pub fn remove(&mut self, occupant: Occupant) -> Result<CellCoord, InvariantViolation> {
        let cell = self
            .positions
            .remove(&occupant)
            .ok_or(InvariantViolation::NotOnGrid { occupant })?;
        let index = self.checked_index(cell)?;
        self.cells[index] = None;
        Ok(cell)
    }

    /// Moves `occupant` onto `destination`, vacating its previous cell.
    ///
    /// Returns the cell the occupant left.
    pub fn move_occupant(
        &mut self,
        occupant: Occupant,
        destination: CellCoord,
    ) -> Result<CellCoord, InvariantViolation> {
        let origin = self
            .position(occupant)
            .ok_or(InvariantViolation::NotOnGrid { occupant })?;
        let destination_index = self.checked_index(destination)?;
        match self.cells[destination_index] {
            Some(existing) if existing != occupant => {
                return Err(InvariantViolation::CellOccupied {
                    cell: destination,
                    occupant: existing,
                });
            }
            _ => {}
        }

        let origin_index = self.checked_index(origin)?;
        self.cells[origin_index] = None;
        self.cells[destination_index] = Some(occupant);
        let _ = self.positions.insert(occupant, destination);
        Ok(origin)
    }

    /// Iterates over every placed entity, ordered by occupant.
    pub fn occupied(&self) -> impl Iterator<Item = (CellCoord, Occupant)> + '_ {
        self.positions.iter().map(|(occupant, cell)| (*cell, *occupant))
    }

    /// Captures a read-only view for robot decision making.
    #[must_use]
    pub fn view<'a>(&'a self, picked_up: &'a [ObstacleId]) -> GridView<'a> {
        GridView::new(&self.cells, self.width, self.height, picked_up)
    }

    fn checked_index(&self, cell: CellCoord) -> Result<usize, InvariantViolation> {
        self.index(cell)
            .ok_or(InvariantViolation::OutOfBounds { cell })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.width && cell.row() < self.height {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
