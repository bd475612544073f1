use clap::Parser;
use media_squeeze::cli::Args;
use media_squeeze::error::Result;
use media_squeeze::{batch, logger};

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.quiet, args.verbose);

    let config = args.into_config()?;
    batch::run_batch(&config)?;

    Ok(())
}
