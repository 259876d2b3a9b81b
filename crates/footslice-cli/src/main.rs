//! footslice CLI - turn foot scans into printable templates
//!
//! Slices an OBJ mesh at stepped offsets and writes an SVG template, or
//! reports what a mesh and its slices look like.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use footslice::section::{slice_stack, PlaneBasis};
use footslice::{
    build_document, load_mesh, FileSource, LayerSummary, Mesh, MeshSummary, PlaneIntersector,
    TemplateSettings,
};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "footslice")]
#[command(about = "Printable foot templates from 3D scans", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Slice a mesh and write the SVG template
    Template {
        /// Input .obj file
        mesh: PathBuf,
        #[command(flatten)]
        slicing: SliceArgs,
        /// Leave out the reference grid
        #[arg(long)]
        no_grid: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Display mesh counts, bounds and per-layer contour sizes
    Info {
        /// Input .obj file
        mesh: PathBuf,
        #[command(flatten)]
        slicing: SliceArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct SliceArgs {
    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Comma-separated offsets along the normal, in meters
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    offsets: Option<Vec<f64>>,
    /// Cutting normal as x,y,z
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    normal: Option<Vec<f64>>,
}

impl SliceArgs {
    /// Settings from the config file (or defaults) with flag overrides.
    fn settings(&self) -> Result<TemplateSettings> {
        let mut settings = match &self.config {
            Some(path) => TemplateSettings::from_toml_file(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => TemplateSettings::default(),
        };
        if let Some(offsets) = &self.offsets {
            settings.offsets = offsets.clone();
        }
        if let Some(normal) = &self.normal {
            let [x, y, z] = normal.as_slice() else {
                bail!("--normal takes three components, got {}", normal.len());
            };
            settings.normal = [*x, *y, *z];
        }
        settings.validate().context("invalid settings")?;
        Ok(settings)
    }
}

#[derive(Serialize)]
struct InfoReport {
    mesh: MeshSummary,
    layers: Vec<LayerSummary>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Template {
            mesh,
            slicing,
            no_grid,
            output,
        } => {
            let mut settings = slicing.settings()?;
            if no_grid {
                settings.draw_grid = false;
            }
            write_template(&mesh, &settings, output.as_deref())?;
        }
        Commands::Info {
            mesh,
            slicing,
            json,
        } => {
            show_info(&mesh, &slicing.settings()?, json)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load a mesh file through a source rooted at its directory.
fn read_mesh(path: &Path) -> Result<Mesh> {
    let id = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("not a mesh file path: {}", path.display()))?;
    let root = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    load_mesh(&FileSource::new(root), id)
        .with_context(|| format!("failed to load mesh {}", path.display()))
}

fn write_template(
    mesh_path: &Path,
    settings: &TemplateSettings,
    output: Option<&Path>,
) -> Result<()> {
    let mesh = read_mesh(mesh_path)?;
    let (layers, doc) = build_document(&mesh, settings, &PlaneIntersector::default())
        .context("failed to build template")?;

    match output {
        Some(path) => {
            doc.export(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} layers ({} contours) to {}",
                layers.len(),
                doc.polygon_count(),
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            doc.export_to_writer(stdout.lock())
                .context("failed to write template to stdout")?;
        }
    }
    Ok(())
}

fn show_info(mesh_path: &Path, settings: &TemplateSettings, json: bool) -> Result<()> {
    let mesh = read_mesh(mesh_path)?;
    let params = settings.stack_params();
    let layers = slice_stack(&mesh, &params, &PlaneIntersector::default())
        .context("failed to slice mesh")?;
    let basis = PlaneBasis::new(&params.normal_vec())?;

    let report = InfoReport {
        mesh: MeshSummary::of(&mesh),
        layers: layers.iter().map(|l| LayerSummary::of(l, &basis)).collect(),
    };

    if json {
        let text = serde_json::to_string_pretty(&report)?;
        println!("{text}");
        return Ok(());
    }

    let mut out = std::io::stdout().lock();
    writeln!(out, "File: {}", mesh_path.display())?;
    writeln!(out, "Vertices: {}", report.mesh.vertices)?;
    writeln!(out, "Faces: {}", report.mesh.faces)?;
    if let (Some(min), Some(max)) = (report.mesh.min, report.mesh.max) {
        writeln!(
            out,
            "Bounds: ({:.4}, {:.4}, {:.4}) to ({:.4}, {:.4}, {:.4}) m",
            min[0], min[1], min[2], max[0], max[1], max[2]
        )?;
    }
    writeln!(out, "\nLayers:")?;
    for layer in &report.layers {
        writeln!(
            out,
            "  [{}] offset {:.4} m: {} contours ({} closed), perimeter {:.4} m, area {:.6} m²",
            layer.index, layer.offset, layer.contours, layer.closed, layer.perimeter, layer.area
        )?;
    }
    Ok(())
}
