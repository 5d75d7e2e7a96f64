//! ParkirLens: parking-levy potential estimation and site segmentation
//!
//! This is the main entrypoint that orchestrates macro computation, site
//! table ingestion, per-site and per-neighborhood aggregation, and K-Means
//! segmentation. Everything is recomputed from the current parameters on
//! every run; there is no cached state between invocations.

use anyhow::Result;
use clap::Parser;
use parkirlens::{
    city_potential, load_parking_sites, neighborhood_potentials, segment_sites, site_potentials,
    viz, Args, MacroParams,
};
use std::time::Instant;

const TOP_NEIGHBORHOODS: usize = 10;

fn main() -> Result<()> {
    let args = Args::parse();
    let params = args.macro_params()?;

    if args.verbose {
        println!("ParkirLens - Parking-Levy Potential & Segmentation");
        println!("==================================================\n");
    }

    // City-wide figures never depend on the site file.
    let city = city_potential(&params);
    viz::print_city_summary(&params, &city);

    match &args.input {
        Some(path) => run_site_pipeline(&args, &params, path)?,
        None => {
            if args.verbose {
                println!("\nNo site file supplied; skipping per-site analysis.");
            }
        }
    }

    Ok(())
}

/// Run ingestion, aggregation, and segmentation over the site table.
fn run_site_pipeline(args: &Args, params: &MacroParams, path: &str) -> Result<()> {
    let start_time = Instant::now();

    if args.verbose {
        println!("\nStep 1: Loading site table");
        println!("  Input file: {}", path);
    }

    let (raw, validated) = load_parking_sites(path)?;

    let sites = match validated {
        Err(schema_error) => {
            // Schema failure is not fatal: the macro block above already ran.
            eprintln!("\nSite table rejected: {}", schema_error);
            eprintln!(
                "Read {} rows x {} columns; fix the headers and re-run.",
                raw.height(),
                raw.width()
            );
            return Ok(());
        }
        Ok(sites) => sites,
    };

    println!(
        "\n✓ Site data loaded: {} of {} rows valid",
        sites.len(),
        raw.height()
    );

    if sites.is_empty() {
        println!("No usable rows; skipping per-site analysis.");
        return Ok(());
    }

    // Step 2: per-site and per-neighborhood figures
    if args.verbose {
        println!("\nStep 2: Computing per-site and per-neighborhood figures");
    }
    let potentials = site_potentials(&sites, params);
    let neighborhoods = neighborhood_potentials(&potentials);
    viz::print_site_table(&potentials);
    viz::print_neighborhood_table(&neighborhoods, TOP_NEIGHBORHOODS);

    // Step 3: segmentation
    if args.verbose {
        println!("\nStep 3: Fitting K-Means segmentation");
        println!("  Number of clusters: {}", args.clusters);
        println!("  Max iterations: {}", args.max_iters);
        println!("  Tolerance: {}", args.tolerance);
        println!("  Seed: {}", args.seed);
    }

    let model_start = Instant::now();
    let segmentation = segment_sites(&sites, args.clusters, args.max_iters, args.tolerance, args.seed)?;
    let model_time = model_start.elapsed();

    match segmentation {
        Some(model) => {
            println!("\n✓ Segmentation fitted");
            if args.verbose {
                println!("  Fitting time: {:.2}s", model_time.as_secs_f64());
            }
            viz::generate_visualization_report(&potentials, &model, params, &args.output)?;
        }
        None => println!("\nNo sites to segment."),
    }

    let total_time = start_time.elapsed();
    println!("\n=== Pipeline Complete ===");
    println!("Total processing time: {:.2}s", total_time.as_secs_f64());

    Ok(())
}
