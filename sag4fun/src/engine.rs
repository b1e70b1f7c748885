//! Butterfly permutation engine.
//!
//! Loading a mask derives one swap-control vector per stage. Every stage swaps adjacent positions and splits the
//! container one depth further, so after `log2(width)` stages each row holds a single position. Running the stages
//! forward partitions the positions by the mask (SAG); running them backward scatters them back (ISG).
//!
//! SAG compacts the selected positions towards position 0 in ascending order, like a bit-extract, and fills the
//! remaining top positions with the deselected ones, the lowest deselected position ending up at `width - 1`:
//!
//! ```text
//!   position  7 6 5 4 3 2 1 0
//!   mask      0 0 1 1 0 1 0 0
//!   in        7 6 5 4 3 2 1 0
//!   sag       0 1 3 6 7 5 4 2   <->  isg
//! ```

use std::fmt;

use arrayvec::ArrayVec;
use static_assertions::{assert_impl_all, const_assert};
use tracing::debug;

use crate::cell::PLACEHOLDER;
use crate::config::Config;
use crate::container::BitContainer;
use crate::error::{Error, Result};
use crate::reshape::Reshape;
use crate::utils::{clog2, is_network_width};

/// Upper bound on the number of stages of any network.
pub const MAX_STAGES: usize = usize::BITS as usize;

const_assert!(clog2(usize::MAX) <= MAX_STAGES);

/// Network operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Gather: selected positions compacted from position 0, deselected ones from the top.
    Sag,

    /// Inverse of [`Operation::Sag`].
    Isg,

    /// Extract: blanks deselected positions, then gathers.
    Ext,

    /// Deposit: blanks positions outside the compacted range, then scatters.
    Dep,
}

impl Operation {
    /// All operations.
    pub const ALL: [Self; 4] = [Self::Sag, Self::Isg, Self::Ext, Self::Dep];

    /// Returns the lowercase mnemonic.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sag => "sag",
            Self::Isg => "isg",
            Self::Ext => "ext",
            Self::Dep => "dep",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.name()) }
}

/// State derived from one mask.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Loaded {
    xcfg: ArrayVec<BitContainer, MAX_STAGES>,
    ext_mask: BitContainer,
    dep_mask: BitContainer,
}

/// Permutation engine for one width.
///
/// The engine starts unloaded. [`Engine::load_mask`] replaces all mask-derived state at once; every operation reads
/// it without changing it.
#[derive(Debug, Clone)]
pub struct Engine {
    width: usize,
    stages: usize,
    config: Config,
    loaded: Option<Loaded>,
}

assert_impl_all!(Engine: Send, Sync);

impl Engine {
    /// Creates an unloaded engine. `width` must be a power of two of at least 2.
    pub fn new(width: usize, config: Config) -> Result<Self> {
        if !is_network_width(width) {
            return Err(Error::InvalidWidth { width });
        }
        Ok(Self { width, stages: clog2(width), config, loaded: None })
    }

    /// Returns the width.
    pub fn width(&self) -> usize { self.width }

    /// Returns the number of stages, `log2(width)`.
    pub fn stages(&self) -> usize { self.stages }

    /// Returns the configuration.
    pub fn config(&self) -> &Config { &self.config }

    /// Returns whether a mask has been loaded.
    pub fn is_loaded(&self) -> bool { self.loaded.is_some() }

    /// Returns the swap controls of every stage; stage `i` is at depth `i`.
    pub fn xcfg(&self) -> Option<&[BitContainer]> { self.loaded.as_ref().map(|loaded| loaded.xcfg.as_slice()) }

    /// Returns the loaded selection mask.
    pub fn ext_mask(&self) -> Option<&BitContainer> { self.loaded.as_ref().map(|loaded| &loaded.ext_mask) }

    /// Returns the placement mask of a compacted value: the positions a gather moves the selected positions to.
    pub fn dep_mask(&self) -> Option<&BitContainer> { self.loaded.as_ref().map(|loaded| &loaded.dep_mask) }

    /// Parses a value of this engine's width at depth 0.
    pub fn parse(&self, text: &str) -> Result<BitContainer> { BitContainer::parse(self.width, 0, text) }

    fn check_width(&self, op: &'static str, container: &BitContainer) -> Result<()> {
        if container.width() != self.width {
            return Err(Error::DimensionMismatch { op, expected: self.width, found: container.width() });
        }
        Ok(())
    }

    fn trace(&self, stage: &'static str, index: usize, container: &BitContainer) {
        if self.config.debug_trace {
            debug!(target: "sag4fun::trace", stage, index, value = %container);
        }
    }

    /// Derives the swap controls of every stage from `mask` and replaces the engine state.
    ///
    /// On error the previous state is kept.
    pub fn load_mask(&mut self, mask: &BitContainer) -> Result<()> {
        self.check_width("load_mask", mask)?;
        let ext_mask = mask.with_depth(0)?;
        let reshape = self.config.reshape;

        let mut xcfg = ArrayVec::new();
        let mut current = ext_mask.clone();
        for index in 0..self.stages {
            let control = current.xorsum()?;
            self.trace("x", index, &control);
            current = reshape.split(&current.swap(&control)?)?;
            xcfg.push(control);
        }
        let dep_mask = reshape.collapse(&current)?;

        debug!(width = self.width, mask = %ext_mask, dep_mask = %dep_mask, %reshape, "loaded mask");
        self.loaded = Some(Loaded { xcfg, ext_mask, dep_mask });
        Ok(())
    }

    /// Parses `text` and loads it as the mask.
    pub fn load_mask_str(&mut self, text: &str) -> Result<()> {
        let mask = self.parse(text)?;
        self.load_mask(&mask)
    }

    fn gather(&self, loaded: &Loaded, value: &BitContainer) -> Result<BitContainer> {
        let reshape = self.config.reshape;
        let mut data = value.clone();
        for (index, control) in loaded.xcfg.iter().enumerate() {
            data = reshape.split(&data.swap(control)?)?;
            self.trace("d", index, &data);
        }
        reshape.collapse(&data)
    }

    fn scatter(&self, loaded: &Loaded, value: &BitContainer) -> Result<BitContainer> {
        let reshape = self.config.reshape;
        let mut data = reshape.expand(value, self.stages)?;
        for (index, control) in loaded.xcfg.iter().enumerate().rev() {
            self.trace("d", index, &data);
            data = reshape.merge(&data)?.swap(control)?;
        }
        Ok(data)
    }

    /// Applies `op` to `value` with the loaded mask. The result is at depth 0.
    pub fn apply(&self, op: Operation, value: &BitContainer) -> Result<BitContainer> {
        let loaded = self.loaded.as_ref().ok_or(Error::NotLoaded)?;
        self.check_width(op.name(), value)?;
        let value = value.with_depth(0)?;

        match op {
            Operation::Sag => self.gather(loaded, &value),
            Operation::Isg => self.scatter(loaded, &value),
            Operation::Ext => self.gather(loaded, &loaded.ext_mask.mask(&value, PLACEHOLDER)?),
            Operation::Dep => self.scatter(loaded, &loaded.dep_mask.mask(&value, PLACEHOLDER)?),
        }
    }

    /// Parses `text` and applies `op` to it.
    pub fn apply_str(&self, op: Operation, text: &str) -> Result<BitContainer> {
        if !self.is_loaded() {
            return Err(Error::NotLoaded);
        }
        self.apply(op, &self.parse(text)?)
    }

    /// Stable gather. See [`Operation::Sag`].
    pub fn sag(&self, value: &BitContainer) -> Result<BitContainer> { self.apply(Operation::Sag, value) }

    /// Inverse gather. See [`Operation::Isg`].
    pub fn isg(&self, value: &BitContainer) -> Result<BitContainer> { self.apply(Operation::Isg, value) }

    /// Extract. See [`Operation::Ext`].
    pub fn ext(&self, value: &BitContainer) -> Result<BitContainer> { self.apply(Operation::Ext, value) }

    /// Deposit. See [`Operation::Dep`].
    pub fn dep(&self, value: &BitContainer) -> Result<BitContainer> { self.apply(Operation::Dep, value) }
}
