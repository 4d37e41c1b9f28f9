//! podtool - scan, render and inspect drink-pod barcodes.

use clap::{Parser, Subcommand, ValueEnum};
use pod_barcode::tools::{grayscale_stats, image_iter, load_luma, scan_files, scan_report};
use pod_barcode::{
    Calibration, DrinkCatalog, Glass, Liquor, Orientation, Recipe, ScanConfig, Strength, render,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "podtool", version, about = "Drink-pod barcode tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan one image for a barcode
    Scan {
        #[arg(long)]
        image: PathBuf,
        /// Use the narrower portrait row band
        #[arg(long)]
        portrait: bool,
        /// Also unpack the decoded word as a recipe
        #[arg(long)]
        recipe: bool,
    },
    /// Scan every image under a directory
    Batch {
        #[arg(long)]
        root: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        portrait: bool,
    },
    /// Render a value as a PNG barcode
    Render {
        #[arg(long)]
        value: u32,
        #[arg(long)]
        out: PathBuf,
        /// Pixels per module
        #[arg(long, default_value = "4")]
        module_px: u32,
        #[arg(long, default_value = "120")]
        height: u32,
    },
    /// Unpack a recipe word
    Recipe {
        /// Word as decimal or 0x-prefixed hex
        #[arg(long)]
        word: String,
        /// Calibration table JSON (defaults to the built-in version)
        #[arg(long)]
        calibration: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = StrengthArg::Standard)]
        strength: StrengthArg,
        /// Print the recipe as JSON
        #[arg(long)]
        json: bool,
    },
    /// Pack a recipe into a word
    Encode {
        #[arg(long, value_enum)]
        glass: GlassArg,
        #[arg(long, default_value = "0")]
        gin: f32,
        #[arg(long, default_value = "0")]
        rum: f32,
        #[arg(long, default_value = "0")]
        vodka: f32,
        #[arg(long, default_value = "0")]
        tequila: f32,
        #[arg(long, default_value = "0")]
        whiskey: f32,
        #[arg(long, default_value = "0")]
        water: f32,
        #[arg(long, default_value = "0")]
        drink_id: u16,
        #[arg(long)]
        calibration: Option<PathBuf>,
        /// Write the barcode for the word to this PNG
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Look up a drink name in a catalog CSV
    Lookup {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        id: u16,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GlassArg {
    Lowball,
    Highball,
    Shaker,
}

impl GlassArg {
    fn to_core(self) -> Glass {
        match self {
            GlassArg::Lowball => Glass::Lowball,
            GlassArg::Highball => Glass::Highball,
            GlassArg::Shaker => Glass::Shaker,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrengthArg {
    Standard,
    Strong,
    Light,
    Mocktail,
}

impl StrengthArg {
    fn to_core(self) -> Strength {
        match self {
            StrengthArg::Standard => Strength::Standard,
            StrengthArg::Strong => Strength::Strong,
            StrengthArg::Light => Strength::Light,
            StrengthArg::Mocktail => Strength::Mocktail,
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            image,
            portrait,
            recipe,
        } => run_scan(&image, portrait, recipe),
        Command::Batch {
            root,
            limit,
            portrait,
        } => run_batch(&root, limit, portrait),
        Command::Render {
            value,
            out,
            module_px,
            height,
        } => run_render(value, &out, module_px, height),
        Command::Recipe {
            word,
            calibration,
            strength,
            json,
        } => run_recipe(&word, calibration.as_deref(), strength.to_core(), json),
        Command::Encode {
            glass,
            gin,
            rum,
            vodka,
            tequila,
            whiskey,
            water,
            drink_id,
            calibration,
            out,
        } => {
            let recipe = Recipe::new(glass.to_core())
                .with_pour(Liquor::Gin, gin)
                .with_pour(Liquor::Rum, rum)
                .with_pour(Liquor::Vodka, vodka)
                .with_pour(Liquor::Tequila, tequila)
                .with_pour(Liquor::Whiskey, whiskey)
                .with_water(water)
                .with_drink_id(drink_id);
            run_encode(&recipe, calibration.as_deref(), out.as_deref())
        }
        Command::Lookup { catalog, id } => run_lookup(&catalog, id),
    }
}

fn orientation(portrait: bool) -> Orientation {
    if portrait {
        Orientation::Portrait
    } else {
        Orientation::Landscape
    }
}

fn load_calibration(path: Option<&Path>) -> CliResult<Calibration> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(Calibration::from_json(&text)?)
        }
        None => Ok(Calibration::builtin(pod_barcode::decoder::config::calibration_version())?),
    }
}

fn parse_word(text: &str) -> CliResult<u32> {
    let text = text.trim();
    let word = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16)?,
        None => text.parse::<u32>()?,
    };
    Ok(word)
}

fn run_scan(path: &Path, portrait: bool, recipe: bool) -> CliResult<()> {
    let image = load_luma(path)?;
    let frame = image
        .frame()
        .ok_or_else(|| format!("image {} has no pixels", path.display()))?;
    let stats = grayscale_stats(&image.pixels);
    println!(
        "{}x{} luma min={} max={} avg={}",
        image.width, image.height, stats.min, stats.max, stats.avg
    );

    let config = ScanConfig::new(orientation(portrait));
    let start = Instant::now();
    let report = scan_report(&frame, &config);
    let elapsed = start.elapsed();

    println!(
        "rows={} structural={} lookup={} checksum={} time={:.2?}",
        report.rows_tried, report.structural, report.lookup, report.checksum, elapsed
    );
    match report.decoded {
        Some((row, word)) => {
            println!("decoded {word} (0x{word:08x}) at row {row}");
            if recipe {
                let calibration = load_calibration(None)?;
                match Recipe::from_word(word, &calibration) {
                    Ok(recipe) => println!("{recipe}"),
                    Err(err) => tracing::warn!("word {word} is not a recipe: {err}"),
                }
            }
        }
        None => {
            if let Some(failure) = report.last_failure {
                println!("no barcode found (last failure: {failure})");
            } else {
                println!("no barcode found");
            }
        }
    }
    Ok(())
}

fn run_batch(root: &Path, limit: Option<usize>, portrait: bool) -> CliResult<()> {
    let paths: Vec<PathBuf> = image_iter(root, limit).collect();
    if paths.is_empty() {
        return Err(format!("no images under {}", root.display()).into());
    }

    let config = ScanConfig::new(orientation(portrait));
    let start = Instant::now();
    let results = scan_files(&paths, &config);
    let elapsed = start.elapsed();

    let mut decoded = 0usize;
    for (path, value) in &results {
        match value {
            Some(word) => {
                decoded += 1;
                println!("{}: {word}", path.display());
            }
            None => println!("{}: -", path.display()),
        }
    }
    let rate = decoded as f64 / results.len() as f64 * 100.0;
    println!(
        "decoded {decoded}/{} ({rate:.1}%) in {elapsed:.2?}",
        results.len()
    );
    Ok(())
}

fn run_render(value: u32, out: &Path, module_px: u32, height: u32) -> CliResult<()> {
    let image = render::render_image(value, module_px, height.max(1));
    image.save(out)?;
    tracing::info!(value, path = %out.display(), "barcode written");
    Ok(())
}

fn run_recipe(
    word: &str,
    calibration: Option<&Path>,
    strength: Strength,
    json: bool,
) -> CliResult<()> {
    let word = parse_word(word)?;
    let calibration = load_calibration(calibration)?;
    let recipe = Recipe::from_word(word, &calibration)?.with_strength(strength);
    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        println!("{recipe}");
    }
    Ok(())
}

fn run_encode(recipe: &Recipe, calibration: Option<&Path>, out: Option<&Path>) -> CliResult<()> {
    let calibration = load_calibration(calibration)?;
    let word = recipe.to_word(&calibration)?;
    println!("{word} (0x{word:08x})");

    // Show what the reader will get back after level snapping
    let snapped = Recipe::from_word(word, &calibration)?;
    println!("{snapped}");

    if let Some(out) = out {
        render::render_image(word, 4, 120).save(out)?;
        tracing::info!(word, path = %out.display(), "barcode written");
    }
    Ok(())
}

fn run_lookup(catalog: &Path, id: u16) -> CliResult<()> {
    let text = std::fs::read_to_string(catalog)?;
    let catalog = DrinkCatalog::parse(&text)?;
    match catalog.name(id) {
        Some(name) => println!("{id}: {name}"),
        None => println!("{id}: not in catalog ({} drinks)", catalog.len()),
    }
    Ok(())
}
