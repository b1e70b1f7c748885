//! Fixed-vector regression checks.
//!
//! Prints the reshape chains over a symbol ramp, then the `localparam` test vectors consumed by the hardware
//! testbench.

use sag4fun::{clog2, BitContainer, Config, Engine, Operation, Reshape, ReshapeStrategy};

use crate::error::GenError;
use crate::{SEPARATOR, SYMBOLS};

/// `(din, mask)` per width, each with a leading marker bit that keeps the leading zeros.
const VECTORS: [(usize, u128, u128); 2] =
    [(32, 0x1_b338_9e39, 0x1_690a_ea75), (64, 0x1_35af_3cf8_a0e5_e582, 0x1_642c_00be_348a_9690)];

/// Returns the `(din, mask)` test vector of `width` as bit strings.
pub fn vectors(width: usize) -> Result<(String, String), GenError> {
    let (_, din, mask) = VECTORS
        .iter()
        .find(|(w, ..)| *w == width)
        .ok_or_else(|| GenError::Regression(format!("no test vectors for width {}", width)))?;
    Ok((format!("{:b}", din)[1..].to_string(), format!("{:b}", mask)[1..].to_string()))
}

fn tag(chain: &BitContainer, flat: &BitContainer, input: &BitContainer) -> String {
    format!("{}{}", if chain == flat { "EQ" } else { "ne" }, if flat == input { "ID" } else { "" })
}

/// Returns the `S` and `M` lines for `width`.
///
/// Each line shows the chain of `reshape` next to the same chain computed at depth 0 or 1 and re-read at depth 0.
/// `EQ` marks agreement, `ID` a chain back at the input.
pub fn chain_lines(width: usize, reshape: ReshapeStrategy) -> Result<Vec<String>, GenError> {
    let symbols = SYMBOLS.chars().take(width - 1).chain(Some('~')).collect::<String>();
    let stages = clog2(width);
    let input = BitContainer::parse(width, 0, &symbols)?;
    let mut lines = vec![];

    let (mut chain, mut flat) = (input.clone(), input.clone());
    for index in 0..stages {
        chain = reshape.split(&chain)?;
        flat = flat.split()?.with_depth(0)?;
        lines.push(format!("S{} {} {} {}", index, chain, flat, tag(&chain, &flat, &input)));
    }

    let (mut chain, mut flat) = (input.with_depth(stages)?, input.with_depth(stages)?);
    for index in 0..stages {
        chain = reshape.merge(&chain)?;
        flat = flat.with_depth(1)?.merge()?;
        lines.push(format!("M{} {} {} {}", index, chain, flat, tag(&chain, &flat, &input)));
    }

    Ok(lines)
}

/// Prints the reshape chains and the test vectors of `width`.
pub fn run(width: usize, config: Config) -> Result<(), GenError> {
    let (din, mask) = vectors(width)?;
    let symbols = SYMBOLS.chars().take(width - 1).chain(Some('~')).collect::<String>();
    let lines = chain_lines(width, config.reshape)?;
    let (splits, merges) = lines.split_at(lines.len() / 2);

    println!();
    println!("I  {}", symbols);

    println!();
    for line in splits {
        println!("{}", line);
    }

    println!();
    for line in merges {
        println!("{}", line);
    }

    let mut engine = Engine::new(width, config)?;
    engine.load_mask_str(&mask)?;

    println!();
    println!("localparam [{}:0] test_din = {}'b {};", width - 1, width, din);
    println!("localparam [{}:0] test_msk = {}'b {};", width - 1, width, mask);
    println!("localparam [{}:0] test_sag = {}'b {};", width - 1, width, engine.apply_str(Operation::Sag, &din)?);
    println!("localparam [{}:0] test_isg = {}'b {};", width - 1, width, engine.apply_str(Operation::Isg, &din)?);

    println!();
    println!("{}", SEPARATOR);
    println!();
    Ok(())
}
