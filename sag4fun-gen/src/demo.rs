//! Interactive demo on letters and digits.

use sag4fun::{Config, Engine, Operation};

use crate::error::GenError;
use crate::regress::sorted_gather_input;
use crate::SEPARATOR;

const LETTERS: &str = "abcdefgh";
const NUMBERS: &str = "12345678";
const MASKS: [&str; 2] = ["00110100", "01010110"];

/// Runs the demo on both masks, failing if a gather or scatter is off.
pub fn run(config: Config) -> Result<(), GenError> {
    let mut engine = Engine::new(8, config)?;

    for mask in MASKS {
        println!("M:  {}", mask);
        engine.load_mask_str(mask)?;

        let zeros = mask.chars().filter(|ch| *ch == '0').count();
        let letters = LETTERS.chars().take(zeros).collect::<Vec<_>>();
        let numbers = NUMBERS.chars().take(mask.len() - zeros).collect::<Vec<_>>();
        let input = sorted_gather_input(mask, &letters, &numbers)?;

        println!();
        println!("D:  {}", input);
        println!("--");
        println!("ext {}", engine.apply_str(Operation::Ext, &input)?);
        println!("--");
        let sag = engine.apply_str(Operation::Sag, &input)?;
        println!("sag {}", sag);

        let expected = letters.iter().chain(&numbers).collect::<String>();
        if sag.to_string() != expected {
            return Err(GenError::Regression(format!("mask {}: gathered {}, expected {}", mask, sag, expected)));
        }
        println!();

        println!("D:  {}", sag);
        println!("--");
        println!("dep {}", engine.dep(&sag)?);
        println!("--");
        let gas = engine.isg(&sag)?;
        println!("gas {}", gas);

        if gas.to_string() != input {
            return Err(GenError::Regression(format!("mask {}: scattered {}, expected {}", mask, gas, input)));
        }
        println!();
        println!("{}", SEPARATOR);
        println!();
    }

    Ok(())
}
