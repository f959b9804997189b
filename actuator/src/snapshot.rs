use serde::{Deserialize, Serialize};

use crate::error::{ActuatorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// One numbered piece as produced by the game engine for a single frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub value: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_from: Option<Vec<Tile>>,
}

/// How a tile entered the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    New,
    Moved { from: Position },
    Merged,
}

impl Tile {
    pub fn new(x: u32, y: u32, value: u32) -> Self {
        Self {
            x,
            y,
            value,
            previous_position: None,
            merged_from: None,
        }
    }

    pub fn moved_from(mut self, x: u32, y: u32) -> Self {
        self.previous_position = Some(Position::new(x, y));
        self
    }

    pub fn merged(mut self, sources: Vec<Tile>) -> Self {
        self.merged_from = Some(sources);
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// A merge result always renders at its final position, even if the engine also recorded a
    /// previous position for it.
    pub fn transition(&self) -> Transition {
        match (&self.merged_from, self.previous_position) {
            (Some(_), _) => Transition::Merged,
            (None, Some(from)) => Transition::Moved { from },
            (None, None) => Transition::New,
        }
    }

    fn validate(&self, columns: usize, rows: usize, nested: bool) -> Result<()> {
        if self.value == 0 || !self.value.is_power_of_two() {
            return Err(ActuatorError::InvalidValue {
                x: self.x,
                y: self.y,
                value: self.value,
            });
        }
        check_bounds(self.position(), columns, rows)?;
        if let Some(prev) = self.previous_position {
            check_bounds(prev, columns, rows)?;
        }
        if let Some(sources) = &self.merged_from {
            if nested {
                return Err(ActuatorError::NestedMerge {
                    x: self.x,
                    y: self.y,
                });
            }
            if sources.is_empty() || sources.len() > 2 {
                return Err(ActuatorError::MergeArity {
                    x: self.x,
                    y: self.y,
                    count: sources.len(),
                });
            }
            for source in sources {
                source.validate(columns, rows, true)?;
            }
        }
        Ok(())
    }
}

fn check_bounds(pos: Position, columns: usize, rows: usize) -> Result<()> {
    if (pos.x as usize) < columns && (pos.y as usize) < rows {
        Ok(())
    } else {
        Err(ActuatorError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            columns,
            rows,
        })
    }
}

/// Read-only board snapshot, stored column-major: `cells[x][y]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    pub cells: Vec<Vec<Option<Tile>>>,
}

impl Grid {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            cells: vec![vec![None; rows]; columns],
        }
    }

    pub fn columns(&self) -> usize {
        self.cells.len()
    }

    pub fn rows(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Places `tile` in the cell matching its coordinates.
    pub fn insert(&mut self, tile: Tile) -> Result<()> {
        let (columns, rows) = (self.columns(), self.rows());
        let slot = self
            .cells
            .get_mut(tile.x as usize)
            .and_then(|column| column.get_mut(tile.y as usize))
            .ok_or(ActuatorError::OutOfBounds {
                x: tile.x,
                y: tile.y,
                columns,
                rows,
            })?;
        *slot = Some(tile);
        Ok(())
    }

    pub fn with_tiles(
        columns: usize,
        rows: usize,
        tiles: impl IntoIterator<Item = Tile>,
    ) -> Result<Self> {
        let mut grid = Self::new(columns, rows);
        for tile in tiles {
            grid.insert(tile)?;
        }
        Ok(grid)
    }

    /// Occupied cells in a fixed order: column by column, top to bottom.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells
            .iter()
            .flat_map(|column| column.iter().filter_map(Option::as_ref))
    }

    pub fn validate(&self) -> Result<()> {
        let (columns, rows) = (self.columns(), self.rows());
        for (column, cells) in self.cells.iter().enumerate() {
            for (row, cell) in cells.iter().enumerate() {
                let Some(tile) = cell else {
                    continue;
                };
                if tile.x as usize != column || tile.y as usize != row {
                    return Err(ActuatorError::Misplaced {
                        column,
                        row,
                        x: tile.x,
                        y: tile.y,
                    });
                }
                tile.validate(columns, rows, false)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub score: u64,
    pub best_score: u64,
    pub terminated: bool,
    pub over: bool,
    pub won: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Metadata {
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.terminated {
            return None;
        }
        if self.won && !self.over {
            Some(Outcome::Won)
        } else {
            Some(Outcome::Lost)
        }
    }
}
