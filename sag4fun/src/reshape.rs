//! Reshape strategies.
//!
//! The network moves a container one depth further after every stage. Two strategies realize that step and are
//! interchangeable: they may order the rows of intermediate grids differently, but every gather and scatter built on
//! top of them yields the same sequence.

use std::fmt;

use crate::container::{merge_source, split_source, BitContainer};
use crate::error::{Error, Result};
use crate::utils::is_network_width;

/// Reshape capability used by the network.
pub trait Reshape: fmt::Debug {
    /// Moves the container one depth deeper.
    fn split(&self, container: &BitContainer) -> Result<BitContainer>;

    /// Moves the container one depth shallower.
    fn merge(&self, container: &BitContainer) -> Result<BitContainer>;

    /// Brings a container produced by repeated [`Reshape::split`] calls back to depth 0.
    fn collapse(&self, container: &BitContainer) -> Result<BitContainer>;

    /// Brings a depth-0 container to `depth`, ready for repeated [`Reshape::merge`] calls.
    fn expand(&self, container: &BitContainer, depth: usize) -> Result<BitContainer>;
}

/// Splits and merges inside each row of the current grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RowLocal;

impl Reshape for RowLocal {
    fn split(&self, container: &BitContainer) -> Result<BitContainer> { container.split() }

    fn merge(&self, container: &BitContainer) -> Result<BitContainer> { container.merge() }

    fn collapse(&self, container: &BitContainer) -> Result<BitContainer> {
        let mut result = container.clone();
        while result.depth() > 0 {
            result = result.merge()?;
        }
        Ok(result)
    }

    fn expand(&self, container: &BitContainer, depth: usize) -> Result<BitContainer> {
        let mut result = container.clone();
        while result.depth() < depth {
            result = result.split()?;
        }
        Ok(result)
    }
}

/// Splits and merges the whole position space as a single row, then re-adopts the result at the new depth.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlattenBased;

impl Reshape for FlattenBased {
    fn split(&self, container: &BitContainer) -> Result<BitContainer> {
        let depth = container.depth();
        if container.num_cols() < 2 {
            return Err(Error::StructuralPrecondition { op: "split", depth });
        }
        if depth == 0 {
            return container.split();
        }
        container.with_depth(0)?.split()?.with_depth(depth + 1)
    }

    fn merge(&self, container: &BitContainer) -> Result<BitContainer> {
        let depth = container.depth();
        if depth == 0 {
            return Err(Error::StructuralPrecondition { op: "merge", depth });
        }
        if depth == 1 {
            return container.merge();
        }
        container.with_depth(1)?.merge()?.with_depth(depth - 1)
    }

    fn collapse(&self, container: &BitContainer) -> Result<BitContainer> { container.with_depth(0) }

    fn expand(&self, container: &BitContainer, depth: usize) -> Result<BitContainer> { container.with_depth(depth) }
}

/// Selects one of the reshape strategies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReshapeStrategy {
    /// [`RowLocal`].
    RowLocal,

    /// [`FlattenBased`].
    #[default]
    FlattenBased,
}

impl ReshapeStrategy {
    /// Both strategies.
    pub const ALL: [Self; 2] = [Self::RowLocal, Self::FlattenBased];

    /// Returns the strategy implementation.
    pub fn reshaper(self) -> &'static dyn Reshape {
        match self {
            Self::RowLocal => &RowLocal,
            Self::FlattenBased => &FlattenBased,
        }
    }
}

impl Reshape for ReshapeStrategy {
    fn split(&self, container: &BitContainer) -> Result<BitContainer> { self.reshaper().split(container) }

    fn merge(&self, container: &BitContainer) -> Result<BitContainer> { self.reshaper().merge(container) }

    fn collapse(&self, container: &BitContainer) -> Result<BitContainer> { self.reshaper().collapse(container) }

    fn expand(&self, container: &BitContainer, depth: usize) -> Result<BitContainer> {
        self.reshaper().expand(container, depth)
    }
}

impl fmt::Display for ReshapeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowLocal => write!(f, "row-local"),
            Self::FlattenBased => write!(f, "flatten"),
        }
    }
}

/// For each destination position of a depth-0 split over `width` positions, the source position feeding it.
///
/// Both strategies agree at depth 0, so a hardware generator can emit one fixed bit-select per output bit.
pub fn split_source_map(width: usize) -> Result<Vec<usize>> {
    if !is_network_width(width) {
        return Err(Error::InvalidWidth { width });
    }
    Ok((0..width).map(|dst| split_source(width, dst)).collect())
}

/// For each destination position of a depth-1 merge over `width` positions, the source position feeding it.
pub fn merge_source_map(width: usize) -> Result<Vec<usize>> {
    if !is_network_width(width) {
        return Err(Error::InvalidWidth { width });
    }
    Ok((0..width).map(|dst| merge_source(width, dst)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    fn indices(width: usize, depth: usize) -> BitContainer {
        let cells = (0..width).map(|i| Cell::Symbol(char::from_u32(0x100 + i as u32).unwrap())).collect();
        BitContainer::from_cells(depth, cells).unwrap()
    }

    fn sources(container: &BitContainer) -> Vec<usize> {
        container.canonical_sequence().iter().map(|cell| cell.to_char() as usize - 0x100).collect()
    }

    #[test]
    fn source_maps_match_container_reshapes() {
        for width in [2, 4, 8, 32, 64] {
            assert_eq!(split_source_map(width).unwrap(), sources(&indices(width, 0).split().unwrap()));
            assert_eq!(merge_source_map(width).unwrap(), sources(&indices(width, 1).merge().unwrap()));
        }
        assert_eq!(split_source_map(8).unwrap(), vec![0, 2, 4, 6, 1, 3, 5, 7]);
        assert_eq!(merge_source_map(8).unwrap(), vec![0, 4, 1, 5, 2, 6, 3, 7]);
        assert_eq!(split_source_map(1).unwrap_err(), Error::InvalidWidth { width: 1 });
    }

    #[test]
    fn flatten_split_deinterleaves_globally() {
        let c = BitContainer::parse(8, 1, "76543210").unwrap();
        let split = FlattenBased.split(&c).unwrap();
        assert_eq!(split.to_string(), "75316420");
        assert_eq!(split.depth(), 2);
        assert_eq!(FlattenBased.merge(&c.with_depth(2).unwrap()).unwrap().to_string(), "73625140");
    }

    #[test]
    fn strategies_agree_at_shallow_depths() {
        let c = indices(16, 0);
        assert_eq!(RowLocal.split(&c).unwrap(), FlattenBased.split(&c).unwrap());
        let c = indices(16, 1);
        assert_eq!(RowLocal.merge(&c).unwrap(), FlattenBased.merge(&c).unwrap());
    }

    #[test]
    fn expand_then_collapse_is_identity() {
        let c = indices(32, 0);
        for strategy in ReshapeStrategy::ALL {
            let deep = strategy.expand(&c, 5).unwrap();
            assert_eq!(deep.depth(), 5);
            let back = strategy.collapse(&deep).unwrap();
            assert_eq!(back.depth(), 0);
            assert_eq!(back, c);
        }
    }

    #[test]
    fn preconditions() {
        for strategy in ReshapeStrategy::ALL {
            let deepest = indices(4, 2);
            assert_eq!(strategy.split(&deepest).unwrap_err(), Error::StructuralPrecondition { op: "split", depth: 2 });
            let flat = indices(4, 0);
            assert_eq!(strategy.merge(&flat).unwrap_err(), Error::StructuralPrecondition { op: "merge", depth: 0 });
        }
    }
}
