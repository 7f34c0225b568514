//! Grover's Search Algorithm Demo
//!
//! Searches 2^n inputs for the pattern an oracle marks.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use console::style;
use serde_json::json;

use qoracle_demos::circuits::grover::{
    all_one_f, grover_iterations, marked_state_oracle, run_grover,
};
use qoracle_demos::{
    DemoConfig, init_logging, print_counts, print_header, print_info, print_result,
    print_section, print_success,
};

#[derive(Parser, Debug)]
#[command(name = "demo-grover")]
#[command(about = "Demonstrate Grover's search algorithm")]
struct Args {
    /// Number of input qubits (search space size = 2^n)
    #[arg(short = 'n', long, default_value = "2")]
    qubits: usize,

    /// Pattern to mark, qubit 0 first (default: all ones)
    #[arg(short, long)]
    marked: Option<String>,

    /// Run with bit/phase-flip noise
    #[arg(long)]
    noise: bool,

    /// Shots for noisy runs
    #[arg(long)]
    shots: Option<u32>,

    /// RNG seed for reproducible counts
    #[arg(long)]
    seed: Option<u64>,

    /// YAML configuration file
    #[arg(short, long, env = "QORACLE_CONFIG")]
    config: Option<PathBuf>,

    /// Print the circuit listing
    #[arg(long)]
    show_circuit: bool,

    /// Write circuit and counts as JSON
    #[arg(long)]
    export: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut config = DemoConfig::load(args.config.as_deref())?;
    if args.noise {
        config.noise.enabled = true;
    }
    if let Some(shots) = args.shots {
        config.noise.shots = shots;
    }
    if args.seed.is_some() {
        config.simulator.seed = args.seed;
    }
    config.validate()?;

    let simulator = config.simulator();
    let run_config = config.run_config();
    let n = args.qubits;
    let marked = args.marked.clone().unwrap_or_else(|| "1".repeat(n));
    let iterations = grover_iterations(n);

    print_header("Grover's Search Algorithm Demo");

    print_section("Problem Setup");
    print_result("Input qubits", n);
    print_result("Search space size", 1u64 << n.min(63));
    print_result("Marked state", format!("|{marked}⟩"));
    print_result("Grover iterations", iterations);
    match run_config.noise {
        Some(model) => print_result("Noise", format!("{model}, {} shots", run_config.shots)),
        None => print_result("Noise", "none (single shot)"),
    }

    let oracle = match &args.marked {
        Some(pattern) => marked_state_oracle(n, pattern)?,
        None => all_one_f(n)?,
    };
    let (circuit, counts) = run_grover(n, &oracle, &simulator, &run_config)?;

    print_section("Circuit");
    print_result("Qubits", circuit.num_qubits());
    print_result("Operations", circuit.num_ops());
    print_result("Depth", circuit.depth());
    if args.show_circuit {
        println!();
        print!("{circuit}");
    }

    print_section("Expected Results");
    let theta = (1.0 / f64::from(1u32 << n.min(31)).sqrt()).asin();
    let success_prob = (((2 * iterations + 1) as f64) * theta).sin().powi(2);
    print_result(
        "Success probability",
        format!("{:.1}%", success_prob * 100.0),
    );

    print_section("Measurement Results");
    print_counts(&counts);
    print_result(
        "Observed frequency of marked state",
        format!("{:.1}%", counts.probability(&marked) * 100.0),
    );

    if counts.most_frequent().is_some_and(|(bits, _)| *bits == marked) {
        print_success("Grover found the marked state");
    } else {
        print_info("The marked state was not the most frequent outcome");
    }

    if let Some(path) = &args.export {
        let payload = json!({
            "circuit": circuit,
            "counts": counts,
            "marked": marked,
            "iterations": iterations,
        });
        std::fs::write(path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("writing {}", path.display()))?;
        print_info(&format!("Exported results to {}", path.display()));
    }

    println!();
    Ok(())
}
