//! Grid model for the match-3 engine.
//!
//! This module defines the game's fundamental components:
//! - `Color`: The closed set of tile colors, including the "special" variants.
//! - `Tile`: A colored tile together with the cell it currently sits on.
//! - `Cell`: Either empty or holding exactly one `Tile`.
//! - `Grid`: A fixed `rows x cols` arrangement of cells with bounds-checked access,
//!   neighbour queries, gravity and terminal rendering.
//!
//! A `Grid` is a flat `Vec<Cell>`, so cloning it is a plain O(cells) value copy and
//! a clone never shares tile state with the original.
use crate::error::{EngineError, ParseError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `(row, col)` coordinate on a grid. Row 0 is the top row.
pub type Position = (usize, usize);

/// Seed used by `Grid::new_random` so that repeated calls produce the same board.
pub const DEFAULT_SEED: u64 = 514514;

/// Represents the color of a tile.
///
/// Equality is identity: a special variant only ever matches itself, never its base color.
/// The derived ordering carries no game meaning; it only keeps maps and sorted output stable.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    RedSpecial,
    DarkRed,
    DarkRedSpecial,
    Blue,
    BlueSpecial,
    Turquoise,
    TurquoiseSpecial,
    Yellow,
    YellowSpecial,
    Pink,
    PinkSpecial,
}

impl Color {
    /// Every color, base and special.
    pub const ALL: [Color; 12] = [
        Color::Red,
        Color::RedSpecial,
        Color::DarkRed,
        Color::DarkRedSpecial,
        Color::Blue,
        Color::BlueSpecial,
        Color::Turquoise,
        Color::TurquoiseSpecial,
        Color::Yellow,
        Color::YellowSpecial,
        Color::Pink,
        Color::PinkSpecial,
    ];

    /// The six non-special colors. Random boards and refills draw from these.
    pub const fn base_colors() -> [Color; 6] {
        [
            Color::Red,
            Color::DarkRed,
            Color::Blue,
            Color::Turquoise,
            Color::Yellow,
            Color::Pink,
        ]
    }

    pub fn is_special(&self) -> bool {
        matches!(
            self,
            Color::RedSpecial
                | Color::DarkRedSpecial
                | Color::BlueSpecial
                | Color::TurquoiseSpecial
                | Color::YellowSpecial
                | Color::PinkSpecial
        )
    }

    /// Converts the color to its character representation.
    ///
    /// Base colors are lowercase, special variants uppercase. An empty cell is `'.'`,
    /// which is handled by the text-board parser rather than by `Color`.
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_solver::engine::Color;
    /// assert_eq!(Color::Red.to_char(), 'r');
    /// assert_eq!(Color::RedSpecial.to_char(), 'R');
    /// assert_eq!(Color::from_char('t'), Some(Color::Turquoise));
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Color::Red => 'r',
            Color::RedSpecial => 'R',
            Color::DarkRed => 'd',
            Color::DarkRedSpecial => 'D',
            Color::Blue => 'b',
            Color::BlueSpecial => 'B',
            Color::Turquoise => 't',
            Color::TurquoiseSpecial => 'T',
            Color::Yellow => 'y',
            Color::YellowSpecial => 'Y',
            Color::Pink => 'p',
            Color::PinkSpecial => 'P',
        }
    }

    /// Inverse of `to_char`. Returns `None` for any character that is not a color.
    pub fn from_char(ch: char) -> Option<Color> {
        Color::ALL.into_iter().find(|color| color.to_char() == ch)
    }

    /// The snake_case name used in configuration files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::RedSpecial => "red_special",
            Color::DarkRed => "dark_red",
            Color::DarkRedSpecial => "dark_red_special",
            Color::Blue => "blue",
            Color::BlueSpecial => "blue_special",
            Color::Turquoise => "turquoise",
            Color::TurquoiseSpecial => "turquoise_special",
            Color::Yellow => "yellow",
            Color::YellowSpecial => "yellow_special",
            Color::Pink => "pink",
            Color::PinkSpecial => "pink_special",
        }
    }

    /// Returns the ANSI background color code string for terminal output.
    fn to_ansi_color_code(&self) -> &'static str {
        match self {
            Color::Red => "41",
            Color::RedSpecial => "101",
            Color::DarkRed => "48;5;52",
            Color::DarkRedSpecial => "48;5;124",
            Color::Blue => "44",
            Color::BlueSpecial => "104",
            Color::Turquoise => "46",
            Color::TurquoiseSpecial => "106",
            Color::Yellow => "43",
            Color::YellowSpecial => "103",
            Color::Pink => "45",
            Color::PinkSpecial => "105",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Color::ALL
            .into_iter()
            .find(|color| color.name() == wanted)
            .ok_or_else(|| ParseError::UnknownColor {
                name: s.to_string(),
            })
    }
}

fn generate_random_color(rng: &mut impl Rng) -> Color {
    let palette = Color::base_colors();
    palette[rng.gen_range(0..palette.len())]
}

/// A colored tile and the cell it occupies.
///
/// Two tiles are equal iff both color and position are equal. Moving a tile means
/// storing a tile with the new position; the grid keeps `position` in sync with the
/// cell that holds it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile {
    pub color: Color,
    pub position: Position,
}

impl Tile {
    pub fn new(color: Color, position: Position) -> Self {
        Tile { color, position }
    }
}

/// Contents of a single grid coordinate.
///
/// Board sources map unclassifiable pixels to `Cell::Empty`; there is no separate
/// "unknown" tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Tile),
}

impl Cell {
    pub fn tile(&self) -> Option<Tile> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(tile) => Some(*tile),
        }
    }

    pub fn color(&self) -> Option<Color> {
        self.tile().map(|tile| tile.color)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn to_char(self) -> char {
        self.color().map_or('.', |color| color.to_char())
    }
}

/// A fixed-size grid of cells.
///
/// Invariant: every occupied cell holds a tile whose `position` equals that cell's
/// coordinate. All mutation goes through methods that uphold it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a new `rows x cols` grid with every cell empty.
    ///
    /// # Examples
    /// ```
    /// use match3_solver::engine::Grid;
    /// let grid = Grid::new_empty(8, 8);
    /// assert_eq!(grid.get(0, 0), Ok(None));
    /// assert_eq!(grid.tile_count(), 0);
    /// ```
    pub fn new_empty(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Creates a grid filled with random base colors using the fixed `DEFAULT_SEED`,
    /// so that repeated calls produce the same board.
    pub fn new_random(rows: usize, cols: usize) -> Self {
        Self::new_random_with_seed(rows, cols, DEFAULT_SEED)
    }

    /// Creates a grid filled with random base colors from the given seed.
    ///
    /// The same seed always produces the same board. No cell is left empty and no
    /// special color is generated.
    pub fn new_random_with_seed(rows: usize, cols: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = Grid::new_empty(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                let color = generate_random_color(&mut rng);
                grid.cells[r * cols + c] = Cell::Occupied(Tile::new(color, (r, c)));
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, occupied or not.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// True iff `0 <= row < rows` and `0 <= col < cols`.
    ///
    /// Takes signed coordinates so that callers walking outward from a tile can probe
    /// one step past the edge without underflow.
    pub fn is_valid(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Unsigned shorthand for `is_valid`.
    pub fn contains(&self, (row, col): Position) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, EngineError> {
        if self.contains((row, col)) {
            Ok(row * self.cols + col)
        } else {
            Err(EngineError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Returns the cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell, EngineError> {
        let idx = self.index(row, col)?;
        Ok(&self.cells[idx])
    }

    /// Returns the tile at `(row, col)`, or `None` if the cell is empty.
    ///
    /// # Errors
    /// `EngineError::OutOfBounds` if the coordinate is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<Tile>, EngineError> {
        Ok(self.cell(row, col)?.tile())
    }

    /// Replaces the contents of `(row, col)`.
    ///
    /// A tile whose `position` disagrees with `(row, col)` is stored with its position
    /// rewritten to `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), EngineError> {
        let idx = self.index(row, col)?;
        self.cells[idx] = match cell {
            Cell::Empty => Cell::Empty,
            Cell::Occupied(tile) => Cell::Occupied(Tile::new(tile.color, (row, col))),
        };
        Ok(())
    }

    /// Places a new tile of `color` at `(row, col)`.
    pub fn place(&mut self, row: usize, col: usize, color: Color) -> Result<(), EngineError> {
        self.set(row, col, Cell::Occupied(Tile::new(color, (row, col))))
    }

    /// Empties `(row, col)` and returns the tile that was there, if any.
    pub fn take(&mut self, row: usize, col: usize) -> Result<Option<Tile>, EngineError> {
        let idx = self.index(row, col)?;
        Ok(std::mem::take(&mut self.cells[idx]).tile())
    }

    /// The up-to-4 orthogonally adjacent in-bounds cells of `(row, col)`.
    ///
    /// Order is always up, down, left, right (skipping those off the grid), which is
    /// what makes move generation order reproducible.
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<Position> {
        const DELTAS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

        DELTAS
            .iter()
            .map(|&(dr, dc)| (row as isize + dr, col as isize + dc))
            .filter(|&(r, c)| self.is_valid(r, c))
            .map(|(r, c)| (r as usize, c as usize))
            .collect()
    }

    /// Exchanges the contents of two cells, normalizing both tiles' positions.
    pub fn swap_cells(&mut self, a: Position, b: Position) -> Result<(), EngineError> {
        let ia = self.index(a.0, a.1)?;
        let ib = self.index(b.0, b.1)?;
        let first = self.cells[ia];
        let second = self.cells[ib];
        self.set(a.0, a.1, second)?;
        self.set(b.0, b.1, first)
    }

    /// Iterates over every tile on the grid in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().filter_map(|cell| cell.tile())
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        (0..self.rows)
            .flat_map(|r| (0..self.cols).map(move |c| (r, c)))
            .filter(|&(r, c)| self.cells[r * self.cols + c].is_empty())
            .collect()
    }

    /// Applies gravity to the grid column by column.
    ///
    /// Tiles in each column fall toward the highest row index, keeping their relative
    /// top-to-bottom order. Vacated upper cells become empty. Each moved tile is stored
    /// with its new position. No tile is created or destroyed.
    ///
    /// # Returns
    /// The number of tiles that changed cell.
    pub fn apply_gravity(&mut self) -> usize {
        let mut moved = 0;
        if self.rows == 0 {
            return moved;
        }
        for c in 0..self.cols {
            // Lowest cell in this column not yet claimed by a settled tile.
            let mut empty_slot = self.rows - 1;
            for r_check in (0..self.rows).rev() {
                let idx = r_check * self.cols + c;
                if let Cell::Occupied(tile) = self.cells[idx] {
                    if r_check != empty_slot {
                        self.cells[empty_slot * self.cols + c] =
                            Cell::Occupied(Tile::new(tile.color, (empty_slot, c)));
                        self.cells[idx] = Cell::Empty;
                        moved += 1;
                    }
                    empty_slot = empty_slot.saturating_sub(1);
                }
            }
        }
        moved
    }

    /// Generates a string representation of the grid, highlighting the given cells.
    ///
    /// The output includes row and column numbers and uses ANSI escape codes for tile
    /// colors. Highlighted cells render as `..`; special tiles render as `**`.
    pub fn to_string_with_highlight(&self, highlight: &[Position]) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c_idx in 0..self.cols {
            output.push_str(&format!("{:<2}", c_idx));
        }
        output.push('\n');

        for r_idx in 0..self.rows {
            output.push_str(&format!("{:<2}", r_idx));

            for c_idx in 0..self.cols {
                let cell = self.cells[r_idx * self.cols + c_idx];
                let is_highlight = highlight.contains(&(r_idx, c_idx));
                let content = match cell.color() {
                    _ if is_highlight => "..",
                    Some(color) if color.is_special() => "**",
                    _ => "  ",
                };
                let color_code = cell.color().map_or("40", |color| color.to_ansi_color_code());
                output.push_str(&format!("\x1b[1;{};m{}\x1b[m", color_code, content));
            }
            if r_idx + 1 < self.rows {
                output.push('\n');
            }
        }

        output
    }

    /// Plain-text form of the grid using the same characters the parser accepts.
    pub fn to_plain_string(&self) -> String {
        (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .map(|c| self.cells[r * self.cols + c].to_char())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Grid {
    /// Formats the grid for display using `to_string_with_highlight(&[])`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(&[]))
    }
}
