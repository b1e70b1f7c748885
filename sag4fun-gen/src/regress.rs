//! Randomized regression.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sag4fun::{Config, Engine, Operation};
use tracing::info;

use crate::error::GenError;
use crate::{SEPARATOR, SYMBOLS};

/// Builds an input whose gather is `low` followed by `high`, in text order.
///
/// Walking the mask text from the left, a `0` takes the last remaining symbol of `low` and a `1` the first remaining
/// symbol of `high`.
pub fn sorted_gather_input(mask: &str, low: &[char], high: &[char]) -> Result<String, GenError> {
    let mut low = low.to_vec();
    let mut high = high.iter().copied();
    let input = mask
        .chars()
        .map(|ch| if ch == '0' { low.pop() } else { high.next() })
        .collect::<Option<String>>()
        .ok_or_else(|| GenError::Regression(format!("mask {} does not fit the symbol split", mask)))?;

    if !low.is_empty() || high.next().is_some() {
        return Err(GenError::Regression(format!("mask {} leaves symbols unused", mask)));
    }
    Ok(input)
}

/// Returns the seed to use and a generator seeded with it, drawing a fresh seed if none is given.
pub fn seeded_rng(seed: Option<u64>) -> (u64, StdRng) {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    (seed, StdRng::seed_from_u64(seed))
}

/// Runs `rounds` random masks at `width`. Without `seed` a fresh one is drawn and logged.
pub fn run(width: usize, rounds: usize, seed: Option<u64>, config: Config) -> Result<(), GenError> {
    if width > SYMBOLS.len() {
        return Err(GenError::Regression(format!("width {} exceeds the {} symbols", width, SYMBOLS.len())));
    }

    let symbols = SYMBOLS.chars().take(width).collect::<Vec<_>>();
    let expected = symbols.iter().collect::<String>();
    let (seed, mut rng) = seeded_rng(seed);
    info!(width, rounds, seed, "regression");
    let mut engine = Engine::new(width, config)?;
    let sep = if width <= 32 { " " } else { "\n\t" };

    for round in 0..rounds {
        let mask = (0..width).map(|_| if rng.gen::<bool>() { '1' } else { '0' }).collect::<String>();
        engine.load_mask_str(&mask)?;

        let zeros = mask.chars().filter(|ch| *ch == '0').count();
        let input = sorted_gather_input(&mask, &symbols[..zeros], &symbols[zeros..])?;
        let sag = engine.apply_str(Operation::Sag, &input)?;
        let isg = engine.isg(&sag)?;

        println!("M={} I={}{}D={} O={}", mask, input, sep, sag, isg);

        if sag.to_string() != expected {
            return Err(GenError::Regression(format!("round {}: mask {} gathers {} out of order", round, mask, sag)));
        }
        if isg.to_string() != input {
            let message = format!("round {}: mask {} scatters {} back to {}", round, mask, sag, isg);
            return Err(GenError::Regression(message));
        }
    }

    println!();
    println!("{}", SEPARATOR);
    println!();
    Ok(())
}
