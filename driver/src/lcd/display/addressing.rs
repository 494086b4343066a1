use crate::{LcdError, LcdResult};

/// DDRAM offset of the first cell of each row.
///
/// Only two rows are mapped. 4-line modules use `0x14`/`0x54` for rows 2 and 3, but those aren't
/// supported by this driver.
pub const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// Number of cells in one DDRAM line in 2-line mode.
pub const MAX_COLUMNS: u8 = 40;

/// Physical size of the display, in characters.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Geometry {
    columns: u8,
    rows: u8,
}

impl Geometry {
    /// # Errors
    /// - `LcdError::InvalidParameters` if either dimension is zero.
    /// - `LcdError::UnsupportedGeometry` if the display has more rows than [ROW_OFFSETS] maps, or
    ///   more columns than a DDRAM line holds.
    pub fn new(columns: u8, rows: u8) -> LcdResult<Self> {
        if columns == 0 {
            return Err(LcdError::InvalidParameters("columns must be greater than zero"));
        }
        if rows == 0 {
            return Err(LcdError::InvalidParameters("rows must be greater than zero"));
        }
        if rows as usize > ROW_OFFSETS.len() || columns > MAX_COLUMNS {
            return Err(LcdError::UnsupportedGeometry { columns, rows });
        }
        Ok(Geometry { columns, rows })
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Clamps a position to the nearest valid cell.
    pub fn clamp(&self, column: u8, row: u8) -> CursorPosition {
        CursorPosition {
            column: column.min(self.columns - 1),
            row: row.min(self.rows - 1),
        }
    }

    /// Row following `row`, wrapping back to the first one.
    pub fn next_row(&self, row: u8) -> u8 {
        (row + 1) % self.rows
    }
}

/// Logical write position kept by the driver.
///
/// `column` may equal the column count right after the last cell of a row was written; the next
/// printed character wraps first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct CursorPosition {
    pub column: u8,
    pub row: u8,
}

impl CursorPosition {
    pub fn new(column: u8, row: u8) -> Self {
        CursorPosition { column, row }
    }
}

/// DDRAM address of a cell.
///
/// # Errors
/// - `LcdError::InvalidArgument` if the row isn't mapped in [ROW_OFFSETS].
pub fn ddram_address(position: CursorPosition) -> LcdResult<u8> {
    let offset = ROW_OFFSETS
        .get(position.row as usize)
        .ok_or(LcdError::InvalidArgument)?;
    Ok(offset + position.column)
}
