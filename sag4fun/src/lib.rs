//! SAG4Fun: a butterfly network that stably gathers and scatters N positions by a selection mask.
//!
//! The network realizes four operations, analogous to hardware compress/expand instructions:
//!
//! - SAG gathers the positions deselected by the mask, then the selected ones, each in ascending position order.
//! - ISG is the exact inverse of SAG.
//! - EXT blanks deselected positions with a placeholder before gathering.
//! - DEP blanks positions outside the compacted range before scattering.
//!
//! ```
//! use sag4fun::{Config, Engine, Operation};
//!
//! let mut engine = Engine::new(8, Config::default())?;
//! engine.load_mask_str("00110100")?;
//! let sag = engine.apply_str(Operation::Sag, "ed12c3ba")?;
//! assert_eq!(sag.to_string(), "abcde123");
//! assert_eq!(engine.isg(&sag)?.to_string(), "ed12c3ba");
//! # Ok::<(), sag4fun::Error>(())
//! ```

// # Tries to deny all lints (`rustc -W help`).
#![deny(absolute_paths_not_starting_with_crate)]
#![deny(anonymous_parameters)]
#![deny(explicit_outlives_requirements)]
#![deny(keyword_idents)]
#![deny(macro_use_extern_crate)]
#![deny(missing_debug_implementations)]
#![deny(non_ascii_idents)]
#![deny(rust_2018_idioms)]
#![deny(trivial_numeric_casts)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(unused_extern_crates)]
#![deny(unused_import_braces)]
#![deny(unused_qualifications)]
//
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_html_tags)]
#![deny(rustdoc::invalid_rust_codeblocks)]
#![deny(rustdoc::bare_urls)]

pub mod cell;
pub mod config;
pub mod container;
pub mod engine;
pub mod error;
pub mod reshape;
pub mod utils;

pub use cell::{Cell, PLACEHOLDER};
pub use config::Config;
pub use container::BitContainer;
pub use engine::{Engine, Operation, MAX_STAGES};
pub use error::{Error, Result};
pub use reshape::{merge_source_map, split_source_map, FlattenBased, Reshape, ReshapeStrategy, RowLocal};
pub use utils::*;
