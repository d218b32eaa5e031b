//! Command-line interface for the `slrgen` table generator.
//!
//! This binary wraps the [`slrgen::generate`] function. It reads a grammar
//! definition file and writes the SLR(1) ACTION/GOTO table as text.
//! Set `RUST_LOG=debug` for progress output.

#[cfg(feature = "cli")]
mod real {
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Parser)]
    #[command(version, about = "Generate an SLR(1) parse table from a grammar")]
    struct Args {
        /// Path to the input grammar definition file
        #[arg(short = 'g', long)]
        grammar: PathBuf,

        /// Path to the output table file
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Also write a listing of productions, states and FIRST/FOLLOW sets
        /// to `<output>.lst` (off by default).
        #[arg(short = 'd', long)]
        debug: bool,
    }

    pub fn main() -> anyhow::Result<()> {
        env_logger::init();
        let args = Args::parse();
        slrgen::generate(args.grammar, args.output, args.debug)
    }
}

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    real::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("slrgen disabled (compiled without `cli` feature)");
}
