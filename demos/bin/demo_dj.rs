//! Deutsch–Jozsa Demo
//!
//! Decides whether an oracle function is constant or balanced with a single
//! query, optionally under bit/phase-flip noise.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use console::style;
use serde_json::json;

use qoracle_demos::circuits::deutsch_jozsa::{
    FunctionKind, balanced_function, classify, constant_function, run_deutsch_jozsa,
};
use qoracle_demos::{
    DemoConfig, init_logging, print_counts, print_header, print_info, print_result,
    print_section, print_success,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Oracle {
    /// f(x) = x₀
    Balanced,
    /// f(x) = 1
    Constant,
}

#[derive(Parser, Debug)]
#[command(name = "demo-dj")]
#[command(about = "Demonstrate the Deutsch-Jozsa algorithm")]
struct Args {
    /// Number of input qubits (the circuit adds one helper)
    #[arg(short = 'n', long, default_value = "5")]
    qubits: usize,

    /// Oracle to query
    #[arg(short, long, value_enum, default_value = "balanced")]
    oracle: Oracle,

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

    print_header("Deutsch-Jozsa Algorithm Demo");

    print_section("Problem Setup");
    print_result("Input qubits", n);
    print_result("Oracle", format!("{:?}", args.oracle).to_lowercase());
    match run_config.noise {
        Some(model) => print_result("Noise", format!("{model}, {} shots", run_config.shots)),
        None => print_result("Noise", "none (single shot)"),
    }

    let oracle = match args.oracle {
        Oracle::Balanced => balanced_function(n)?,
        Oracle::Constant => constant_function(n)?,
    };
    let (circuit, counts) = run_deutsch_jozsa(n, &oracle, &simulator, &run_config)?;

    print_section("Circuit");
    print_result("Qubits", circuit.num_qubits());
    print_result("Classical bits", circuit.num_clbits());
    print_result("Operations", circuit.num_ops());
    print_result("Depth", circuit.depth());
    if args.show_circuit {
        println!();
        print!("{circuit}");
    }

    print_section("Measurement Results");
    print_counts(&counts);

    let verdict = classify(&counts);
    print_section("Verdict");
    print_result("Function is", style(verdict).yellow().bold());
    let expected = match args.oracle {
        Oracle::Balanced => FunctionKind::Balanced,
        Oracle::Constant => FunctionKind::Constant,
    };
    if verdict == expected {
        print_success("Deutsch-Jozsa identified the oracle correctly");
    } else {
        print_info("Noise pushed the most frequent outcome to the wrong verdict");
    }

    if let Some(path) = &args.export {
        let payload = json!({
            "circuit": circuit,
            "counts": counts,
            "verdict": verdict,
        });
        std::fs::write(path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("writing {}", path.display()))?;
        print_info(&format!("Exported results to {}", path.display()));
    }

    println!();
    Ok(())
}
