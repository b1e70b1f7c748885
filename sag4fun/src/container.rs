//! Reshapeable bit containers.
//!
//! A container holds `width` cells viewed as a `2^depth x (width >> depth)` grid. Cells are stored in linear position
//! order, so the grid cell `(row, col)` is position `row * num_cols + col` and reshaping only changes how positions
//! are grouped into rows.
//!
//! ```text
//!   depth 0:  [ 7 6 5 4 3 2 1 0 ]          split          depth 1:  [ 7 5 3 1 ]
//!                                     ------------>                 [ 6 4 2 0 ]
//!                                     <------------
//!                                         merge
//! ```
//!
//! Textual form is big-endian: position `width - 1` is the leftmost character.

use std::fmt;

use itertools::Itertools;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::some_or;

/// Source position that feeds `dst` when a grid with `num_cols` columns is split row-locally.
///
/// Cell `(i, 2j + b)` moves to `(2i + b, j)`.
pub(crate) fn split_source(num_cols: usize, dst: usize) -> usize {
    let half = num_cols >> 1;
    let (row, j) = (dst / half, dst % half);
    (row >> 1) * num_cols + 2 * j + (row & 1)
}

/// Source position that feeds `dst` when a grid is merged row-locally into `num_cols` columns.
///
/// Cell `(2i + b, j)` moves to `(i, 2j + b)`.
pub(crate) fn merge_source(num_cols: usize, dst: usize) -> usize {
    let (i, col) = (dst / num_cols, dst % num_cols);
    (2 * i + (col & 1)) * (num_cols >> 1) + (col >> 1)
}

/// Grid of cells at a network depth.
#[derive(Debug, Clone)]
pub struct BitContainer {
    depth: usize,
    cells: Vec<Cell>,
}

impl BitContainer {
    fn check_shape(width: usize, depth: usize) -> Result<()> {
        if width == 0 || !width.is_power_of_two() {
            return Err(Error::InvalidWidth { width });
        }
        if depth > width.trailing_zeros() as usize {
            return Err(Error::InvalidDepth { width, depth });
        }
        Ok(())
    }

    /// Creates a container with every cell set to `Bit0`.
    pub fn new(width: usize, depth: usize) -> Result<Self> { Self::filled(width, depth, Cell::Bit0) }

    /// Creates a container with every cell set to `cell`.
    pub fn filled(width: usize, depth: usize, cell: Cell) -> Result<Self> {
        Self::check_shape(width, depth)?;
        Ok(Self { depth, cells: vec![cell.normalized(); width] })
    }

    /// Creates a container from cells given in linear position order.
    ///
    /// `Symbol('0')` and `Symbol('1')` are stored as bits, so the text form parses back to the same container.
    pub fn from_cells(depth: usize, cells: Vec<Cell>) -> Result<Self> {
        Self::check_shape(cells.len(), depth)?;
        Ok(Self { depth, cells: cells.into_iter().map(Cell::normalized).collect() })
    }

    /// Parses the big-endian text form.
    ///
    /// A single space is accepted between two row groups of the grid at `depth`, and is skipped.
    pub fn parse(width: usize, depth: usize, text: &str) -> Result<Self> {
        let mut result = Self::new(width, depth)?;
        let num_cols = result.num_cols();
        let mut chars = text.chars().peekable();

        for position in (0..width).rev() {
            let ch = some_or!(
                chars.next(),
                return Err(Error::LengthMismatch { expected: width, found: width - 1 - position })
            );
            result.cells[position] = Cell::from_char(ch);
            if position != 0 && position % num_cols == 0 && chars.peek() == Some(&' ') {
                let _ = chars.next();
            }
        }

        let rest = chars.count();
        if rest != 0 {
            return Err(Error::LengthMismatch { expected: width, found: width + rest });
        }

        Ok(result)
    }

    /// Returns the number of cells.
    pub fn width(&self) -> usize { self.cells.len() }

    /// Returns the network depth.
    pub fn depth(&self) -> usize { self.depth }

    /// Returns the number of rows, `2^depth`.
    pub fn num_rows(&self) -> usize { 1 << self.depth }

    /// Returns the number of columns, `width >> depth`.
    pub fn num_cols(&self) -> usize { self.width() >> self.depth }

    /// Returns the cells in linear position order, independent of the grid shape.
    pub fn canonical_sequence(&self) -> &[Cell] { &self.cells }

    /// Returns whether both containers hold the same cells at the same positions, whatever their depths.
    pub fn equals_by_sequence(&self, other: &Self) -> bool { self.cells == other.cells }

    /// Returns the same cells viewed at another depth.
    pub fn with_depth(&self, depth: usize) -> Result<Self> {
        Self::check_shape(self.width(), depth)?;
        Ok(Self { depth, cells: self.cells.clone() })
    }

    fn position(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.num_rows() || col >= self.num_cols() {
            return Err(Error::OutOfBounds { position: row * self.num_cols() + col, width: self.width() });
        }
        Ok(row * self.num_cols() + col)
    }

    /// Returns the cell at a linear position.
    pub fn get(&self, position: usize) -> Result<Cell> {
        self.cells.get(position).copied().ok_or(Error::OutOfBounds { position, width: self.width() })
    }

    /// Returns the cell at a grid coordinate.
    pub fn get_at(&self, row: usize, col: usize) -> Result<Cell> { self.get(self.position(row, col)?) }

    /// Sets the cell at a linear position.
    pub fn set(&mut self, position: usize, cell: Cell) -> Result<()> {
        let width = self.width();
        let slot = self.cells.get_mut(position).ok_or(Error::OutOfBounds { position, width })?;
        *slot = cell.normalized();
        Ok(())
    }

    /// Sets the cell at a grid coordinate.
    pub fn set_at(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        let position = self.position(row, col)?;
        self.set(position, cell)
    }

    /// Returns the cells as booleans, failing on the first symbol.
    pub fn bits(&self) -> Result<Vec<bool>> {
        self.cells
            .iter()
            .enumerate()
            .map(|(position, cell)| match *cell {
                Cell::Symbol(symbol) => Err(Error::NotABit { position, symbol }),
                bit => Ok(bit == Cell::Bit1),
            })
            .collect()
    }

    /// Computes the swap controls of one network stage.
    ///
    /// Each row is scanned by column pairs with a carry that starts at 1. For pair `j`, the control is
    /// `carry ^ self[2j]` and the carry becomes `control ^ self[2j + 1]`. The result has half the cells at the same
    /// depth.
    pub fn xorsum(&self) -> Result<Self> {
        let num_cols = self.num_cols();
        if num_cols < 2 {
            return Err(Error::StructuralPrecondition { op: "xorsum", depth: self.depth });
        }

        let bits = self.bits()?;
        let mut cells = Vec::with_capacity(self.width() >> 1);
        for row in bits.chunks_exact(num_cols) {
            let mut carry = true;
            for pair in row.chunks_exact(2) {
                let control = carry ^ pair[0];
                carry = control ^ pair[1];
                cells.push(control.into());
            }
        }

        Ok(Self { depth: self.depth, cells })
    }

    /// Swaps positions `2i` and `2i + 1` wherever `control[i]` is set.
    ///
    /// Pairs are taken over the flat position space, not per row.
    pub fn swap(&self, control: &Self) -> Result<Self> {
        if control.width() * 2 != self.width() {
            return Err(Error::DimensionMismatch { op: "swap", expected: self.width() >> 1, found: control.width() });
        }

        let mut cells = self.cells.clone();
        for (pair, swap) in cells.chunks_exact_mut(2).zip(control.bits()?) {
            if swap {
                pair.swap(0, 1);
            }
        }

        Ok(Self { depth: self.depth, cells })
    }

    fn gather<F>(&self, depth: usize, source: F) -> Self
    where F: Fn(usize) -> usize {
        Self { depth, cells: (0..self.width()).map(|dst| self.cells[source(dst)]).collect() }
    }

    /// Deinterleaves every row: even columns go to the upper new row, odd columns to the lower one.
    pub fn split(&self) -> Result<Self> {
        let num_cols = self.num_cols();
        if num_cols < 2 {
            return Err(Error::StructuralPrecondition { op: "split", depth: self.depth });
        }
        Ok(self.gather(self.depth + 1, |dst| split_source(num_cols, dst)))
    }

    /// Interleaves every pair of rows back into one. Inverse of [`BitContainer::split`].
    pub fn merge(&self) -> Result<Self> {
        if self.depth == 0 {
            return Err(Error::StructuralPrecondition { op: "merge", depth: self.depth });
        }
        let num_cols = self.num_cols() << 1;
        Ok(self.gather(self.depth - 1, |dst| merge_source(num_cols, dst)))
    }

    /// Selects `other[p]` where `self[p]` is truthy and `default` elsewhere.
    pub fn mask(&self, other: &Self, default: Cell) -> Result<Self> {
        if other.width() != self.width() {
            return Err(Error::DimensionMismatch { op: "mask", expected: self.width(), found: other.width() });
        }

        let cells = self
            .cells
            .iter()
            .zip(&other.cells)
            .map(|(sel, cell)| if sel.is_truthy() { *cell } else { default })
            .collect();
        Ok(Self { depth: self.depth, cells })
    }

    /// Complements every bit.
    pub fn inverse(&self) -> Result<Self> {
        let cells = self.bits()?.into_iter().map(|bit| Cell::from(!bit)).collect();
        Ok(Self { depth: self.depth, cells })
    }
}

impl PartialEq for BitContainer {
    fn eq(&self, other: &Self) -> bool { self.equals_by_sequence(other) }
}

impl Eq for BitContainer {}

impl fmt::Display for BitContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cells.iter().rev().join(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::PLACEHOLDER;

    fn parse(width: usize, depth: usize, text: &str) -> BitContainer {
        BitContainer::parse(width, depth, text).unwrap()
    }

    #[test]
    fn shape() {
        let c = BitContainer::new(8, 1).unwrap();
        assert_eq!((c.num_rows(), c.num_cols()), (2, 4));
        assert_eq!(BitContainer::new(8, 4).unwrap_err(), Error::InvalidDepth { width: 8, depth: 4 });
        assert_eq!(BitContainer::new(6, 0).unwrap_err(), Error::InvalidWidth { width: 6 });
        assert!(BitContainer::new(1, 0).is_ok());
    }

    #[test]
    fn text_is_big_endian() {
        let c = parse(4, 0, "ab01");
        assert_eq!(c.get(0).unwrap(), Cell::Bit1);
        assert_eq!(c.get(1).unwrap(), Cell::Bit0);
        assert_eq!(c.get(3).unwrap(), Cell::Symbol('a'));
        assert_eq!(c.to_string(), "ab01");
    }

    #[test]
    fn digit_symbols_are_stored_as_bits() {
        let c = BitContainer::from_cells(0, vec![Cell::Symbol('0'), Cell::Symbol('1')]).unwrap();
        assert_eq!(c.canonical_sequence(), &[Cell::Bit0, Cell::Bit1]);
        assert_eq!(BitContainer::parse(2, 0, &c.to_string()).unwrap(), c);

        let values = parse(2, 0, "ab");
        assert_eq!(c.mask(&values, PLACEHOLDER).unwrap().to_string(), "a_");

        let mut d = BitContainer::filled(2, 0, Cell::Symbol('1')).unwrap();
        assert_eq!(d.bits().unwrap(), vec![true, true]);
        d.set(0, Cell::Symbol('0')).unwrap();
        assert_eq!(d.get(0).unwrap(), Cell::Bit0);
    }

    #[test]
    fn parse_accepts_row_separator() {
        let c = parse(8, 1, "7654 3210");
        assert_eq!(c.to_string(), "76543210");
        assert_eq!(c.get_at(1, 0).unwrap(), Cell::Symbol('4'));
        assert_eq!(c, parse(8, 0, "76543210"));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(BitContainer::parse(4, 0, "101").unwrap_err(), Error::LengthMismatch { expected: 4, found: 3 });
        assert_eq!(BitContainer::parse(4, 0, "10101").unwrap_err(), Error::LengthMismatch { expected: 4, found: 5 });
        // A separator is only skipped on a row boundary of the parse depth.
        assert!(BitContainer::parse(8, 0, "7654 3210").is_err());
    }

    #[test]
    fn access_is_bounds_checked() {
        let mut c = BitContainer::new(4, 1).unwrap();
        c.set_at(1, 1, Cell::Bit1).unwrap();
        assert_eq!(c.get(3).unwrap(), Cell::Bit1);
        assert_eq!(c.get(4).unwrap_err(), Error::OutOfBounds { position: 4, width: 4 });
        assert!(c.get_at(2, 0).is_err());
        assert!(c.set(9, Cell::Bit0).is_err());
    }

    #[test]
    fn equality_ignores_depth() {
        let a = parse(8, 0, "10110100");
        let b = a.with_depth(3).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.depth(), b.depth());
        assert_ne!(a, parse(8, 0, "10110101"));
    }

    #[test]
    fn xorsum_carry_starts_at_one() {
        assert_eq!(parse(4, 0, "1011").xorsum().unwrap().to_string(), "10");
        assert_eq!(parse(8, 1, "10110110").xorsum().unwrap().to_string(), "1011");
        assert_eq!(parse(2, 0, "00").xorsum().unwrap().to_string(), "1");

        let at_max = BitContainer::new(4, 2).unwrap();
        assert_eq!(at_max.xorsum().unwrap_err(), Error::StructuralPrecondition { op: "xorsum", depth: 2 });
        assert!(parse(4, 0, "1a11").xorsum().is_err());
    }

    #[test]
    fn swap_pairs_flat_positions() {
        let c = parse(8, 0, "abcdefgh");
        assert_eq!(c.swap(&parse(4, 0, "0101")).unwrap().to_string(), "abdcefhg");
        let deep = c.with_depth(2).unwrap();
        assert_eq!(deep.swap(&parse(4, 2, "1000")).unwrap().to_string(), "bacdefgh");
        assert_eq!(
            c.swap(&parse(8, 0, "00000000")).unwrap_err(),
            Error::DimensionMismatch { op: "swap", expected: 4, found: 8 }
        );
    }

    #[test]
    fn split_and_merge() {
        let c = parse(8, 0, "76543210");
        assert_eq!(c.split().unwrap().to_string(), "75316420");
        assert_eq!(parse(8, 1, "76543210").split().unwrap().to_string(), "75643120");
        assert_eq!(parse(8, 1, "76543210").merge().unwrap().to_string(), "73625140");
        assert_eq!(parse(8, 2, "76543210").merge().unwrap().to_string(), "75643120");

        let mut d = c.clone();
        for _ in 0..3 {
            d = d.split().unwrap();
        }
        assert_eq!(d.split().unwrap_err(), Error::StructuralPrecondition { op: "split", depth: 3 });
        for _ in 0..3 {
            d = d.merge().unwrap();
        }
        assert_eq!(d, c);
        assert_eq!(d.depth(), 0);
        assert_eq!(c.merge().unwrap_err(), Error::StructuralPrecondition { op: "merge", depth: 0 });
    }

    #[test]
    fn mask_and_inverse() {
        let m = parse(4, 0, "0110");
        let v = parse(4, 0, "abcd");
        assert_eq!(m.mask(&v, Cell::Symbol('_')).unwrap().to_string(), "_bc_");
        assert_eq!(m.inverse().unwrap().to_string(), "1001");
        assert_eq!(m.inverse().unwrap().mask(&v, Cell::Bit0).unwrap().to_string(), "a00d");
        assert!(v.inverse().is_err());
        assert!(m.mask(&parse(2, 0, "ab"), Cell::Bit0).is_err());
    }

    #[test]
    fn transforms_leave_input_untouched() {
        let c = parse(8, 0, "10110100");
        let _ = c.split().unwrap();
        let _ = c.swap(&parse(4, 0, "1111")).unwrap();
        let _ = c.xorsum().unwrap();
        assert_eq!(c.to_string(), "10110100");
        assert_eq!(c.depth(), 0);
    }
}
