use clap::Parser;
use scan_split::container::E57Backend;
use scan_split::engine::copy::OutputNamer;
use scan_split::engine::errors::SplitError;
use scan_split::engine::events::TracingEventSink;
use scan_split::engine::inventory::Inventory;
use scan_split::engine::partition::OutputPlan;
use scan_split::engine::splitter::{SplitSummary, Splitter};
use scan_split::logging;
use scan_split::shared::bytes::format_bytes;
use scan_split::shared::config::{Settings, load_settings, load_settings_from};
use scan_split::shared::path::absolutize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "scan_split")]
#[command(version, about = "Split an E57 point-cloud file into size-bounded files, keeping scans intact", long_about = None)]
struct Args {
    /// E57 file to split
    input: PathBuf,

    /// Settings file (TOML)
    /// Defaults to SCAN_SPLIT_CONFIG or ./scan_split.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum estimated size of one output file, in bytes
    #[arg(long)]
    max_size: Option<u64>,

    /// Estimated bytes per point used to size scans
    #[arg(long)]
    bytes_per_point: Option<u64>,

    /// Directory for the output files (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Only print the planned output files
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Settings file does not exist: {}", path.display());
                }
                load_settings_from(path)?
            }
            None => load_settings()?,
        };

        if let Some(max_size) = self.max_size {
            settings.split.max_file_size_bytes = max_size;
        }
        if let Some(bytes_per_point) = self.bytes_per_point {
            settings.split.bytes_per_point = bytes_per_point;
        }
        if let Some(dir) = &self.output_dir {
            settings.split.output_dir = Some(dir.clone());
        }
        Ok(settings)
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let settings = args.settings()?;
    logging::init(&settings.logging)?;

    let input = absolutize(&args.input);
    if !input.exists() {
        SplitError::InputMissing(input).log_error();
        return Ok(ExitCode::from(1));
    }

    let sink = TracingEventSink;
    let splitter = Splitter::new(E57Backend, settings.split.clone(), &sink);

    if args.dry_run {
        let (inventory, plan) = match splitter.plan(&input) {
            Ok(planned) => planned,
            Err(e) => {
                e.log_error();
                return Ok(ExitCode::from(1));
            }
        };
        let paths = OutputNamer::for_input(&input, &settings.split).assign(&plan, &inventory);
        if args.json {
            let report = serde_json::json!({
                "input": input,
                "inventory": inventory,
                "plan": plan,
                "paths": paths,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_plan(&inventory, &plan, &paths);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let summary = match splitter.run(&input) {
        Ok(summary) => summary,
        Err(e) => {
            e.log_error();
            return Ok(ExitCode::from(1));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(ExitCode::SUCCESS)
}

fn scan_label(inventory: &Inventory, index: usize) -> String {
    inventory
        .unit(index)
        .map(|u| u.name.clone())
        .unwrap_or_else(|| format!("Scan{}", index))
}

fn print_plan(inventory: &Inventory, plan: &OutputPlan, paths: &[PathBuf]) {
    println!(
        "{} scan(s) into {} file(s), ceiling {}",
        inventory.len(),
        plan.len(),
        format_bytes(plan.ceiling_bytes)
    );
    println!();
    for (batch, path) in plan.batches.iter().zip(paths) {
        let names: Vec<String> = batch
            .source_indices
            .iter()
            .map(|&i| scan_label(inventory, i))
            .collect();
        println!(
            "  {} | {} scan(s) | ~{} | {}",
            path.display(),
            batch.len(),
            format_bytes(batch.estimated_bytes),
            names.join(", ")
        );
    }
    if !inventory.skipped.is_empty() {
        println!();
        println!("Skipped {} unreadable scan(s):", inventory.skipped.len());
        for skipped in &inventory.skipped {
            println!("  [{}] {}", skipped.index, skipped.reason);
        }
    }
}

fn print_summary(summary: &SplitSummary) {
    println!();
    println!("=== Split Summary ===");
    println!();
    for output in &summary.outputs {
        let size = output
            .actual_bytes
            .map(format_bytes)
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "  {} | {}/{} scan(s) | {}",
            output.path.display(),
            output.written.len(),
            output.planned.len(),
            size
        );
        if let Some(error) = &output.error {
            println!("      error: {}", error);
        }
        for failure in &output.failures {
            println!(
                "      failed [{}] {}: {}",
                failure.index,
                scan_label(&summary.inventory, failure.index),
                failure.reason
            );
        }
        for &index in &output.empty {
            println!(
                "      empty  [{}] {}",
                index,
                scan_label(&summary.inventory, index)
            );
        }
    }
    println!();
    println!(
        "Total: {} scan(s) written to {} file(s), {} failed, {} skipped during inventory",
        summary.scans_written(),
        summary.outputs.len() - summary.failed_outputs(),
        summary.scans_failed(),
        summary.inventory.skipped.len()
    );
}
