//! # headerfence
//!
//! A tool that keeps a fenced license header at the top of source files.

mod cli;
mod output;

use anyhow::Result;

use crate::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli.run_args)
}
