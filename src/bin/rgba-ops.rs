//! rgba-ops CLI tool
//!
//! Command-line interface for the per-pixel RGBA transforms of the
//! rgba-ops library.

#[cfg(feature = "cli")]
use rgba_ops::cli;

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    cli::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Please rebuild with --features cli");
    std::process::exit(1);
}
