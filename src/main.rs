use clap::Parser;

fn main() -> anyhow::Result<()> {
    gigafter::cli::run(gigafter::cli::Cli::parse())
}
