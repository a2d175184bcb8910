//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() -> eyre::Result<()> {
    tripwise_cli::init_logging()?;
    tripwise_cli::run()?;
    Ok(())
}
