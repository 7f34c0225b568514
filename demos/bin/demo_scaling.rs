//! Qubit Scaling Demo
//!
//! Times Deutsch–Jozsa or Grover as the input register grows and prints
//! the samples; `--export` writes them as JSON for plotting.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use console::style;

use qoracle_demos::runners::{Algorithm, max_inputs, measure_scaling};
use qoracle_demos::{
    DemoConfig, create_progress_bar, init_logging, print_header, print_info, print_result,
    print_section, print_success,
};

#[derive(Parser, Debug)]
#[command(name = "demo-scaling")]
#[command(about = "Measure execution time against the number of qubits")]
struct Args {
    /// Algorithm to sweep
    #[arg(short, long, value_enum, default_value = "grover")]
    algorithm: Algorithm,

    /// Smallest number of input qubits
    #[arg(long, default_value = "1")]
    from: usize,

    /// Largest number of input qubits (default: from the config file)
    #[arg(long)]
    to: Option<usize>,

    /// Run with bit/phase-flip noise
    #[arg(long)]
    noise: bool,

    /// YAML configuration file
    #[arg(short, long, env = "QORACLE_CONFIG")]
    config: Option<PathBuf>,

    /// Write the timing samples as JSON
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

    let simulator = config.simulator();
    let run_config = config.run_config();
    let configured_max = match args.algorithm {
        Algorithm::DeutschJozsa => config.scaling.deutsch_jozsa_max,
        Algorithm::Grover => config.scaling.grover_max,
    };
    let to = args.to.unwrap_or(configured_max);
    let limit = max_inputs(&simulator);

    if args.from == 0 || args.from > to {
        bail!("invalid qubit range {}..={}", args.from, to);
    }
    if to > limit {
        bail!(
            "n = {to} needs {} qubits but the simulator is limited to {}",
            to + 1,
            simulator.max_qubits()
        );
    }

    print_header("Qubit Scaling Demo");

    print_section("Sweep");
    print_result("Algorithm", args.algorithm);
    print_result("Input qubits", format!("{}..={}", args.from, to));
    print_result("Shots per run", run_config.shots);

    let pb = create_progress_bar((to - args.from + 1) as u64, "simulating");
    let report = measure_scaling(
        args.algorithm,
        args.from..=to,
        &simulator,
        &run_config,
        |sample| {
            pb.set_message(format!("n = {}", sample.num_qubits));
            pb.inc(1);
        },
    )?;
    pb.finish_and_clear();

    print_section("Execution Time");
    println!("{}", report.summary());
    if let Some(slowest) = report.slowest() {
        print_result(
            "Slowest",
            format!("n = {} ({:?})", slowest.num_qubits, slowest.duration()),
        );
    }

    if let Some(path) = &args.export {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("writing {}", path.display()))?;
        print_info(&format!("Exported samples to {}", path.display()));
    }

    println!();
    print_success("Scaling sweep complete");
    Ok(())
}
