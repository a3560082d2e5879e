use std::io::Read;

use anyhow::Result;
use clap::Parser;

use editbridge::cli::CliArgs;

fn main() -> Result<()> {
    editbridge::tracing::init();

    let args = CliArgs::parse();

    let mut input = String::new();
    if args.reads_stdin() {
        std::io::stdin().read_to_string(&mut input)?;
    }

    let stdout = std::io::stdout();
    args.run(&input, &mut stdout.lock())
}
