//! gridweld CLI
//!
//! Command-line interface for decimating and inspecting model group documents.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gridweld::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridweld")]
#[command(version)]
#[command(about = "Grid-bucket mesh decimation for Model3DGroup documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decimate every part of a document and write the result
    Simplify {
        /// Input document
        input: PathBuf,
        /// Grid cells along the longest axis of the model
        #[arg(short, long, default_value_t = DEFAULT_RESOLUTION)]
        resolution: u32,
        /// Output document (defaults to the resolution-tagged cache path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load a document through the cache, decimating large groups
    Load {
        /// Input document
        input: PathBuf,
        /// Grid cells along the longest axis of the model
        #[arg(short, long, default_value_t = DEFAULT_RESOLUTION)]
        resolution: u32,
        /// Groups with at most this many parts are not decimated
        #[arg(short, long, default_value_t = gridweld::DEFAULT_MAX_PARTS_WITHOUT_SIMPLIFICATION)]
        max_parts: usize,
    },

    /// Display document information
    Info {
        /// Input document
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Simplify {
            input,
            resolution,
            output,
        } => cmd_simplify(input, resolution, output),
        Commands::Load {
            input,
            resolution,
            max_parts,
        } => cmd_load(input, resolution, max_parts),
        Commands::Info { input } => cmd_info(input),
    }
}

fn cmd_simplify(input: PathBuf, resolution: u32, output: Option<PathBuf>) -> Result<()> {
    if resolution == 0 {
        bail!("resolution must be at least 1");
    }

    let group = read_model_group(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let simplified = GridDecimator::with_resolution(resolution)
        .simplify_group(&group, &NoProgress)
        .with_context(|| format!("failed to simplify {}", input.display()))?;

    let output = output.unwrap_or_else(|| cache_path(&input, resolution));
    write_model_group(&simplified, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{}: {} -> {} parts, {} -> {} triangles",
        output.display(),
        group.len(),
        simplified.len(),
        group.total_triangle_count(),
        simplified.total_triangle_count()
    );
    Ok(())
}

fn cmd_load(input: PathBuf, resolution: u32, max_parts: usize) -> Result<()> {
    if resolution == 0 {
        bail!("resolution must be at least 1");
    }

    let config = LoaderConfig::default()
        .with_resolution(resolution)
        .with_max_parts_without_simplification(max_parts);
    let group = ModelGroupLoader::new(config)
        .load(&input)
        .with_context(|| format!("failed to load {}", input.display()))?;

    println!("Parts:     {}", group.len());
    println!("Vertices:  {}", group.total_vertex_count());
    println!("Triangles: {}", group.total_triangle_count());
    println!("Renderable parts: {}", group.renderable_parts().count());
    Ok(())
}

fn cmd_info(input: PathBuf) -> Result<()> {
    let group = read_model_group(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    println!("File: {}", input.display());
    println!("Parts: {}", group.len());
    for (i, part) in group.iter().enumerate() {
        println!(
            "  [{}] {} vertices, {} triangles, front {}, back {}",
            i,
            part.mesh.vertex_count(),
            part.mesh.triangle_count(),
            part.front_color,
            part.back_color
        );
    }

    match group.bounds() {
        Some(bounds) => {
            let max = bounds.max();
            println!(
                "Bounds: ({}, {}, {}) - ({}, {}, {})",
                bounds.min.x, bounds.min.y, bounds.min.z, max.x, max.y, max.z
            );
        }
        None => println!("Bounds: empty"),
    }
    Ok(())
}
