//! qoracle demo suite
//!
//! Oracle-based quantum algorithms on the qoracle statevector simulator:
//!
//! - **Deutsch–Jozsa**: constant versus balanced with a single oracle query
//! - **Grover's Search**: amplitude amplification of a marked input
//! - **Scaling**: execution time as the input register grows
//!
//! ```rust
//! use qoracle_demos::circuits::RunConfig;
//! use qoracle_demos::circuits::deutsch_jozsa::{FunctionKind, balanced_function, classify, run_deutsch_jozsa};
//! use qoracle_sim::Simulator;
//!
//! let oracle = balanced_function(4)?;
//! let (_, counts) = run_deutsch_jozsa(4, &oracle, &Simulator::new(), &RunConfig::noiseless())?;
//! assert_eq!(classify(&counts), FunctionKind::Balanced);
//! # Ok::<(), qoracle_demos::AlgoError>(())
//! ```

pub mod circuits;
pub mod config;
pub mod error;
pub mod runners;

pub use config::{ConfigError, DemoConfig};
pub use error::{AlgoError, AlgoResult};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use qoracle_sim::Counts;
use tracing_subscriber::EnvFilter;

/// Outcomes shown by [`print_counts`] before eliding the rest.
const MAX_HISTOGRAM_ROWS: usize = 16;

/// Install the tracing subscriber for a `-v` count (warn, info, debug, trace).
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

/// Create a progress bar for demo operations.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print a histogram of measured bitstrings, most frequent first.
pub fn print_counts(counts: &Counts) {
    let sorted = counts.sorted();
    let total = counts.total_shots().max(1) as f64;

    for (bitstring, count) in sorted.iter().take(MAX_HISTOGRAM_ROWS) {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style("█".repeat(bar_len)).green()
        );
    }

    if sorted.len() > MAX_HISTOGRAM_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_HISTOGRAM_ROWS);
    }
}
