//! commission-runner: headless commission calculator.
//!
//! Usage:
//!   commission-runner --input partners.json --output commissions.json [--config commission.json]
//!   commission-runner --generate 50000 [--seed 42] --output partners.json
//!   commission-runner --bench 50000 [--seed 42]

use anyhow::{Context, Result};
use commission_core::{
    config::CommissionConfig,
    generator::generate_members,
    io::{run_pipeline, JsonFileSink, JsonFileSource, MemorySink, MemorySource},
    timing::timed,
};
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;

const USAGE: &str = "\
Usage:
  commission-runner --input partners.json --output commissions.json [--config commission.json]
  commission-runner --generate N [--seed S] --output partners.json
  commission-runner --bench N [--seed S]";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("{USAGE}");
            ExitCode::from(1)
        }
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Ok(false) means the arguments did not match any mode.
fn run(args: &[String]) -> Result<bool> {
    let seed = parse_arg(args, "--seed", 42u64);
    let config = match flag_value(args, "--config") {
        Some(path) => CommissionConfig::load(path)?,
        None => CommissionConfig::default(),
    };

    if let Some(n) = flag_value(args, "--bench") {
        let n: usize = n.parse().with_context(|| format!("--bench expects a count, got {n}"))?;
        bench(n, seed, config)?;
        return Ok(true);
    }

    if let Some(n) = flag_value(args, "--generate") {
        let n: usize = n.parse().with_context(|| format!("--generate expects a count, got {n}"))?;
        let Some(output) = flag_value(args, "--output") else {
            return Ok(false);
        };
        generate(n, seed, output)?;
        return Ok(true);
    }

    let (Some(input), Some(output)) = (flag_value(args, "--input"), flag_value(args, "--output"))
    else {
        return Ok(false);
    };

    let mut source = JsonFileSource::new(input);
    let mut sink = JsonFileSink::new(output);
    let commissions = run_pipeline(&mut source, &mut sink, config)
        .with_context(|| format!("computing commissions from {input}"))?;

    println!("Commissions written");
    println!("  input:   {input}");
    println!("  output:  {output}");
    println!("  members: {}", commissions.len());
    println!("  total:   {:.2}", commissions.total());
    Ok(true)
}

fn generate(n: usize, seed: u64, output: &str) -> Result<()> {
    let records = generate_members(n, seed);
    let file = File::create(output).with_context(|| format!("creating {output}"))?;
    serde_json::to_writer(BufWriter::new(file), &records)?;
    println!("Generated {n} members (seed {seed}) into {output}");
    Ok(())
}

fn bench(n: usize, seed: u64, config: CommissionConfig) -> Result<()> {
    let records = timed("Generate", || generate_members(n, seed));
    let mut source = MemorySource::new(records);
    let mut sink = MemorySink::default();
    let commissions = timed("Total", || run_pipeline(&mut source, &mut sink, config))?;

    println!("=== BENCH SUMMARY ===");
    println!("  members:   {}", commissions.len());
    println!("  seed:      {seed}");
    println!("  total:     {:.2}", commissions.total());
    println!("(run with RUST_LOG=info for per-stage timings)");
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
