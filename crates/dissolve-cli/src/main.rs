//! Dissolve CLI - run the pixel dissolve pass offline.
//!
//! - `dissolve run` - split a PNG into pixel descriptors and write them as JSON
//! - `dissolve inspect` - report what a PNG would produce
//! - `dissolve config` - print the default configuration as YAML

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use dissolve_core::{DissolveConfig, Dissolver, PixelImage, SourceImage, SplitMix64, Vec2};

/// Pixels-per-unit assumed for imported sprites.
const DEFAULT_PIXELS_PER_UNIT: f32 = 100.0;

#[derive(Parser)]
#[command(name = "dissolve")]
#[command(about = "Split sprites into per-pixel entity descriptors", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dissolve an image and emit the pixel batch
    Run {
        /// PNG (or any format the `image` crate decodes)
        #[arg(long)]
        image: PathBuf,

        /// YAML dissolve configuration; defaults apply to missing keys
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed for the impulse and lifetime draws
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Native pixels-per-unit of the sprite
        #[arg(long, default_value_t = DEFAULT_PIXELS_PER_UNIT)]
        ppu: f32,

        /// Write the batch as JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Summarise an image without dissolving it
    Inspect {
        #[arg(long)]
        image: PathBuf,

        #[arg(long, default_value_t = DEFAULT_PIXELS_PER_UNIT)]
        ppu: f32,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration
    Config,
}

#[derive(Debug, Serialize)]
struct Inspection {
    image: String,
    width: u32,
    height: u32,
    opaque_pixels: usize,
    bounds: Vec2,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            image,
            config,
            seed,
            ppu,
            output,
        } => run(&image, config.as_deref(), seed, ppu, output.as_deref()),
        Commands::Inspect { image, ppu, json } => inspect(&image, ppu, json),
        Commands::Config => {
            print!("{}", serde_yaml::to_string(&DissolveConfig::default())?);
            Ok(())
        }
    }
}

fn run(
    image_path: &Path,
    config_path: Option<&Path>,
    seed: u64,
    ppu: f32,
    output: Option<&Path>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => DissolveConfig::default(),
    };
    let image = load_image(image_path, ppu)?;

    tracing::info!(image = %image_path.display(), seed, "Dissolving");

    let batch = Dissolver::new(config)
        .run(Some(&image), Vec2::ZERO, &mut SplitMix64::new(seed))
        .with_context(|| format!("Failed to dissolve {}", image_path.display()))?;

    tracing::info!(
        spawned = batch.stats.spawned,
        transparent = batch.stats.transparent,
        capped = batch.stats.capped,
        "Dissolve complete"
    );

    let json = serde_json::to_string_pretty(&batch)?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}

fn inspect(image_path: &Path, ppu: f32, json: bool) -> Result<()> {
    let image = load_image(image_path, ppu)?;
    let bounds = image.bounds_size();
    let inspection = Inspection {
        image: image_path.display().to_string(),
        width: image.width(),
        height: image.height(),
        opaque_pixels: image.opaque_count(),
        bounds,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
        return Ok(());
    }

    println!("Image: {}", inspection.image);
    println!("Size: {}x{} px", inspection.width, inspection.height);
    println!("Bounds: {:.3} x {:.3} units", bounds.x, bounds.y);
    println!("Opaque pixels: {}", inspection.opaque_pixels);

    Ok(())
}

fn load_config(path: &Path) -> Result<DissolveConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config in {}", path.display()))
}

fn parse_config(content: &str) -> Result<DissolveConfig> {
    let config: DissolveConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

fn load_image(path: &Path, ppu: f32) -> Result<PixelImage> {
    if ppu.is_nan() || ppu <= 0.0 {
        bail!("pixels-per-unit must be positive, got {ppu}");
    }

    let decoded = image::open(path)
        .with_context(|| format!("Failed to decode image {}", path.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        bail!("{} has no pixels", path.display());
    }

    Ok(
        PixelImage::from_rgba8_top_down(width, height, ppu, decoded.as_raw())
            .with_name(path.display().to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dissolve_core::{ColliderShape, MinMax};

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = parse_config("max_pixels: 12\ncollider: box\n").unwrap();
        assert_eq!(config.max_pixels, 12);
        assert_eq!(config.collider, Some(ColliderShape::Box));
        assert_eq!(config.pixel_lifetime, MinMax::ZERO);
        assert!(config.physics.is_none());
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let err = parse_config("pixel_lifetime: { min: 3.0, max: 1.0 }\n").unwrap_err();
        assert!(err.to_string().contains("pixel_lifetime"), "{err}");
    }

    #[test]
    fn default_config_round_trips_through_yaml() {
        let yaml = serde_yaml::to_string(&DissolveConfig::default()).unwrap();
        let config = parse_config(&yaml).unwrap();
        assert_eq!(config, DissolveConfig::default());
    }

    #[test]
    fn decoded_png_is_flipped_to_y_up() {
        let dir = std::env::temp_dir().join(format!("dissolve-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("top_left.png");

        // Only the top-left texel is opaque.
        let mut png = image::RgbaImage::new(2, 2);
        png.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        png.save(&path).unwrap();

        let image = load_image(&path, 1.0).unwrap();
        assert_eq!(image.opaque_count(), 1);
        assert!(!image.sample(0, 1).is_transparent());
        assert!(image.sample(0, 0).is_transparent());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn non_positive_ppu_is_an_error() {
        assert!(load_image(Path::new("unused.png"), 0.0).is_err());
    }
}
