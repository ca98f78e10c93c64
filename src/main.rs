use anyhow::Result;
use clap::Parser;

use strainspread::args::Args;
use strainspread::runner::Runner;

fn main() -> Result<()> {
    let args = Args::parse();
    let mut runner = Runner::new(args)?;
    runner.start()
}
