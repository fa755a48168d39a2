use clap::{Parser, Subcommand};
use seqshot::{config, explorer, metadata, output, raster, sampler, writer};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "seqshot")]
#[command(about = "Save image batches with sequence numbers, embedded metadata, and sidecars")]
#[command(long_about = "\
Save image batches with sequence numbers, embedded metadata, and sidecars

Your output directory is the data source. Each save scans it for the
highest existing number under the chosen prefix and continues from there,
so independent runs can share a directory without a counter file.

Filesystem layout produced:

  output/
  ├── render_00001.png             # pixels + metadata as PNG text chunks
  ├── render_00001.md              # the same metadata as a Markdown document
  ├── render_00002.png
  └── render_00002.md

Prefix resolution: an empty or whitespace --prefix falls back to
default_prefix from seqshot.toml (stock: \"seqshot\").

Run 'seqshot gen-config' to generate a documented seqshot.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file
    #[arg(long, default_value = "seqshot.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct SaveArgs {
    /// Image files or directories to save (directories searched recursively)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory (default: output_dir from config)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Filename prefix; empty falls back to the configured default
    #[arg(long, default_value = "")]
    prefix: String,

    /// Positive prompt fragment (repeatable; fragments join with newlines)
    #[arg(long = "positive")]
    positive: Vec<String>,

    /// Negative prompt fragment (repeatable; fragments join with newlines)
    #[arg(long = "negative")]
    negative: Vec<String>,

    /// Free-text model description
    #[arg(long, default_value = "")]
    model_description: String,

    /// Sampling steps
    #[arg(long, default_value_t = 20)]
    steps: u32,

    /// Guidance scale
    #[arg(long, default_value_t = 7.0)]
    cfg: f64,

    /// Sampler name (common: euler, euler_a, dpm++_2m, dpm++_sde, heun, lms)
    #[arg(long, default_value = "euler")]
    sampler: String,

    /// Scheduler (common: normal, karras, exponential, polyexponential)
    #[arg(long, default_value = "normal")]
    scheduler: String,

    /// Print the save report as JSON instead of the tree view
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Save images into the sequenced output directory
    Save(SaveArgs),
    /// Open a configured folder key, or any path, in the file manager
    Open {
        /// A key from [folders] in seqshot.toml, or a filesystem path
        target: String,
    },
    /// Print a stock seqshot.toml with all options documented
    GenConfig,
}

/// Extensions accepted when collecting inputs. Matches the decoders
/// compiled into the image crate for this binary.
const INPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| INPUT_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// Decode every input into one ordered batch. Directories are walked
/// recursively in filename order; non-image files inside them are skipped,
/// but an explicitly named file must decode.
fn collect_inputs(inputs: &[PathBuf]) -> Result<raster::ImageInput, Box<dyn std::error::Error>> {
    let mut rasters = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() && is_image_file(entry.path()) {
                    rasters.push(image::open(entry.path())?);
                }
            }
        } else {
            rasters.push(image::open(input)?);
        }
    }
    Ok(raster::ImageInput::Batch(rasters))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let app_config = config::Config::load_or_default(&cli.config)?;

    match cli.command {
        Command::Save(args) => {
            let settings = sampler::SamplerSettings {
                steps: args.steps,
                cfg: args.cfg,
                sampler_name: args.sampler,
                scheduler: args.scheduler,
            };
            settings.validate()?;

            let positive = metadata::join_fragments(args.positive.iter().map(String::as_str), "\n");
            let negative = metadata::join_fragments(args.negative.iter().map(String::as_str), "\n");
            let record = settings.to_record(&args.model_description, &positive, &negative);

            let images = collect_inputs(&args.inputs)?;
            let out_dir = args
                .output
                .unwrap_or_else(|| PathBuf::from(&app_config.output_dir));

            let outcome = writer::save_batch(
                images,
                &out_dir,
                &args.prefix,
                &app_config.default_prefix,
                &record,
            )?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                output::print_save_output(&outcome, &out_dir);
            }
        }
        Command::Open { target } => {
            let path = match app_config.folder(&target) {
                Some(folder) => PathBuf::from(folder),
                None => {
                    let as_path = PathBuf::from(&target);
                    if !as_path.exists() && !app_config.folder_keys().is_empty() {
                        return Err(format!(
                            "'{target}' is neither a configured folder key nor an existing \
                             path (configured keys: {})",
                            app_config.folder_keys().join(", ")
                        )
                        .into());
                    }
                    as_path
                }
            };
            explorer::reveal(&path)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_toml());
        }
    }

    Ok(())
}
