//! Common test utilities.

#![allow(dead_code)]

use std::sync::Once;

use proptest::prelude::*;
use sag4fun::{Cell, Config, Engine, ReshapeStrategy};
use tracing_subscriber::EnvFilter;

/// Ensures tracing is only initialized once across all tests.
static INIT: Once = Once::new();

/// Initializes a test-writer subscriber filtered by `RUST_LOG` (default `sag4fun=debug`).
///
/// Safe to call multiple times; only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sag4fun=debug"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

/// Symbols used for values, mixing bits and payloads.
pub const VALUE_ALPHABET: &[char] = &['0', '1', 'a', 'b', 'c', 'x', 'y', 'z', '_', '~'];

/// Builds an engine and loads `mask` into it.
pub fn loaded(mask: &[bool], reshape: ReshapeStrategy) -> Engine {
    let mut engine = Engine::new(mask.len(), Config::default().with_reshape(reshape)).unwrap();
    engine.load_mask(&bits(mask)).unwrap();
    engine
}

/// Container of bits in position order.
pub fn bits(mask: &[bool]) -> sag4fun::BitContainer {
    sag4fun::BitContainer::from_cells(0, mask.iter().map(|&b| Cell::from(b)).collect()).unwrap()
}

/// Container of chars in position order.
pub fn cells(value: &[char]) -> sag4fun::BitContainer {
    sag4fun::BitContainer::from_cells(0, value.iter().map(|&ch| Cell::from_char(ch)).collect()).unwrap()
}

/// Partition computed without the network, in position order.
///
/// Selected values fill positions from 0 upwards in ascending original order; deselected values fill positions from
/// the top downwards in ascending original order.
pub fn reference_gather<T: Copy>(mask: &[bool], value: &[T]) -> Vec<T> {
    let selected = mask.iter().zip(value).filter(|(m, _)| **m).map(|(_, v)| *v);
    let deselected = mask.iter().zip(value).filter(|(m, _)| !**m).map(|(_, v)| *v).collect::<Vec<_>>();
    selected.chain(deselected.into_iter().rev()).collect()
}

/// Width, mask and value of a random network input.
pub fn network_input(max_log_width: u32) -> impl Strategy<Value = (Vec<bool>, Vec<char>)> {
    (1..=max_log_width).prop_flat_map(|log_width| {
        let width = 1usize << log_width;
        (
            prop::collection::vec(any::<bool>(), width),
            prop::collection::vec(prop::sample::select(VALUE_ALPHABET), width),
        )
    })
}

