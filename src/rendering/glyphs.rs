//! 5x7 bitmap glyphs for the raster backend.
//!
//! The raster backend ships no font files, so text is drawn as filled cells.
//! The table covers the characters the scene writes (`Title<n>` and
//! `<n>. text content`) plus a few neighbours; anything else renders as a
//! hollow box.

const GLYPH_COLS: usize = 5;
const GLYPH_ROWS: usize = 7;

/// Cap height as a fraction of the font size.
const CAP_HEIGHT: f64 = 0.7;
/// Horizontal shear applied to italic text, per unit of height above the baseline.
const ITALIC_SHEAR: f64 = 0.2;

/// Rows top to bottom; bit 4 is the leftmost column.
fn bitmap(ch: char) -> [u8; GLYPH_ROWS] {
    match ch {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'c' => [0b00000, 0b00000, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110],
        'e' => [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        'i' => [0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110],
        'l' => [0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'n' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'o' => [0b00000, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
        't' => [0b01000, 0b01000, 0b11100, 0b01000, 0b01000, 0b01001, 0b00110],
        'x' => [0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ' ' => [0; GLYPH_ROWS],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

/// Axis-aligned cell to fill, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Horizontal advance of one character at `size`.
pub fn advance(size: f64) -> f64 {
    let cell = size * CAP_HEIGHT / GLYPH_ROWS as f64;
    cell * (GLYPH_COLS + 1) as f64
}

/// Cells covering `text` with its baseline at `(x, baseline)`.
///
/// Bold widens each cell by half a cell; italic shifts each row right in
/// proportion to its height above the baseline.
pub fn layout(text: &str, x: f64, baseline: f64, size: f64, italic: bool, bold: bool) -> Vec<Cell> {
    let mut cells = Vec::new();
    if !(size.is_finite() && size > 0.0) {
        return cells;
    }
    let cell = size * CAP_HEIGHT / GLYPH_ROWS as f64;
    let top = baseline - cell * GLYPH_ROWS as f64;
    let extra = if bold { cell * 0.5 } else { 0.0 };

    for (i, ch) in text.chars().enumerate() {
        let origin = x + i as f64 * advance(size);
        for (row, &bits) in bitmap(ch).iter().enumerate() {
            let y = top + row as f64 * cell;
            let shear = if italic {
                (baseline - (y + cell / 2.0)) * ITALIC_SHEAR
            } else {
                0.0
            };
            for col in 0..GLYPH_COLS {
                if (bits >> (GLYPH_COLS - 1 - col)) & 1 == 1 {
                    cells.push(Cell {
                        x: origin + col as f64 * cell + shear,
                        y,
                        w: cell + extra,
                        h: cell,
                    });
                }
            }
        }
    }
    cells
}
