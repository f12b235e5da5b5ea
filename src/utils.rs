use crate::engine::{Color, Grid};
use crate::error::ParseError;

/// Parses an array of string slices into a `Grid`, inferring its size.
///
/// The grid has one row per string slice and as many columns as the longest row.
/// Shorter rows are padded with empty cells on the right.
///
/// Valid characters are the color characters from `Color::to_char` (lowercase for
/// base colors, uppercase for special variants) and `'.'` for an empty cell:
/// - `r` / `R`: red
/// - `d` / `D`: dark red
/// - `b` / `B`: blue
/// - `t` / `T`: turquoise
/// - `y` / `Y`: yellow
/// - `p` / `P`: pink
///
/// # Examples
/// ```
/// use match3_solver::utils::grid_from_str_array;
/// use match3_solver::engine::Color;
///
/// let grid = grid_from_str_array(&["rbY", "t."]).unwrap();
/// assert_eq!(grid.rows(), 2);
/// assert_eq!(grid.cols(), 3);
/// assert_eq!(grid.get(0, 2).unwrap().map(|t| t.color), Some(Color::YellowSpecial));
/// assert_eq!(grid.get(1, 1).unwrap(), None);
/// assert_eq!(grid.get(1, 2).unwrap(), None); // padded
///
/// assert!(grid_from_str_array(&["rxb"]).is_err());
/// ```
pub fn grid_from_str_array(s: &[&str]) -> Result<Grid, ParseError> {
    let rows = s.len();
    let cols = s.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    if rows == 0 || cols == 0 {
        return Err(ParseError::EmptyBoard);
    }
    grid_from_str_array_sized(s, rows, cols)
}

/// Parses an array of string slices into a `rows x cols` `Grid`.
///
/// If fewer than `rows` rows are provided the remaining rows are empty, and a row
/// shorter than `cols` is padded with empty cells.
///
/// # Errors
/// * `ParseError::TooManyRows` if `s` has more than `rows` entries.
/// * `ParseError::RowTooLong` if a row has more than `cols` characters.
/// * `ParseError::UnrecognizedCharacter` for anything that is neither a color nor `'.'`.
pub fn grid_from_str_array_sized(s: &[&str], rows: usize, cols: usize) -> Result<Grid, ParseError> {
    if s.len() > rows {
        return Err(ParseError::TooManyRows {
            expected: rows,
            found: s.len(),
        });
    }

    let mut grid = Grid::new_empty(rows, cols);

    for (r, row_str) in s.iter().enumerate() {
        let length = row_str.chars().count();
        if length > cols {
            return Err(ParseError::RowTooLong {
                row: r,
                expected: cols,
                found: length,
            });
        }

        for (c, ch) in row_str.chars().enumerate() {
            if ch == '.' {
                continue;
            }
            let color = Color::from_char(ch)
                .ok_or(ParseError::UnrecognizedCharacter { ch, row: r, col: c })?;
            grid.place(r, c, color)?;
        }
    }
    Ok(grid)
}

/// Parses a whole board text (one row per line).
///
/// Blank lines and surrounding whitespace are ignored, so board files may end with a
/// trailing newline or be indented.
pub fn grid_from_text(text: &str) -> Result<Grid, ParseError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    grid_from_str_array(&lines)
}
