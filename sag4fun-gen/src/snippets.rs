//! Generates Verilog functions for the reshape steps of the network.
//!
//! Each function selects one fixed input bit per output bit. Verilog bit `b` holds position `XLEN - 1 - b`, matching
//! the big-endian text form of the containers.

use std::fmt;
use std::fs;
use std::path::Path;

use itertools::Itertools;
use sag4fun::{merge_source_map, split_source_map, wrap_words};
use tracing::info;

use crate::error::GenError;

const XLENS: [usize; 2] = [32, 64];
const WRAP_WIDTH: usize = 70;

/// File written into the output directory.
pub const FILE_NAME: &str = "sag4fun_functions.vh";

/// Verilog function permuting an `XLEN`-bit input, with one case per supported `XLEN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermFunction {
    name: &'static str,
    cases: Vec<(usize, Vec<usize>)>,
}

impl PermFunction {
    /// Builds the function from the source map of every supported `XLEN`.
    pub fn new<F>(name: &'static str, source_map: F) -> Result<Self, GenError>
    where F: Fn(usize) -> sag4fun::Result<Vec<usize>> {
        let cases = XLENS
            .iter()
            .map(|&xlen| -> Result<_, GenError> { Ok((xlen, source_map(xlen)?)) })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name, cases })
    }

    fn select_expr(xlen: usize, sources: &[usize]) -> String {
        format!("{{{}}}", sources.iter().map(|src| format!("in[{}]", xlen - 1 - src)).join(", "))
    }
}

impl fmt::Display for PermFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "function [XLEN-1:0] {};", self.name)?;
        writeln!(f, "  input [XLEN-1:0] in;")?;

        let last = self.cases.len() - 1;
        for (index, (xlen, sources)) in self.cases.iter().enumerate() {
            let guard = match index {
                0 => format!("if (XLEN == {}) ", xlen),
                _ if index == last => "else ".to_string(),
                _ => format!("else if (XLEN == {}) ", xlen),
            };
            let stmt = format!("{}{} = {};", guard, self.name, Self::select_expr(*xlen, sources));
            for line in wrap_words(stmt.split_whitespace(), WRAP_WIDTH, "    ", "      ") {
                writeln!(f, "{}", line)?;
            }
        }

        write!(f, "endfunction")
    }
}

/// Returns the `split` and `merge` functions.
pub fn functions() -> Result<Vec<PermFunction>, GenError> {
    Ok(vec![PermFunction::new("split", split_source_map)?, PermFunction::new("merge", merge_source_map)?])
}

/// Prints the functions and writes them into `path_dir`.
pub fn run<P: AsRef<Path>>(path_dir: P) -> Result<(), GenError> {
    let text = functions()?.iter().map(|function| function.to_string()).join("\n\n");

    println!();
    println!("{}", text);
    println!();

    fs::create_dir_all(path_dir.as_ref())?;
    let path = path_dir.as_ref().join(FILE_NAME);
    fs::write(&path, format!("{}\n", text))?;
    info!(path = %path.display(), "wrote Verilog functions");

    Ok(())
}
