//! # font-to-bytes CLI
//!
//! Command-line interface for converting bitmap fonts into source code.
//!
//! ## Usage
//!
//! ```bash
//! # List modes and output formats
//! font-to-bytes modes
//!
//! # Convert an 8x8 font to an Arduino array on stdout
//! font-to-bytes convert font.png
//!
//! # 10x16 cells, plain C++ array, inverted bits, written to a file
//! font-to-bytes convert --mode 10x16 --format cpp --invert --output font.h font.png
//!
//! # Remember the chosen options for the next run
//! font-to-bytes convert --mode 8x8-lr --reverse --save-settings font.png
//!
//! # Clear a saved option again
//! font-to-bytes convert --no-reverse --save-settings font.png
//!
//! # Render a character chart
//! font-to-bytes chart --output chart.png font.png
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use font_to_bytes::{
    FontError, Mode, OutputFormat, SourceCodeGenerator,
    chart::{ChartSheet, MAX_PIXEL_SIZE},
    pixels::ImagePixels,
    settings::Settings,
};

/// Font to Bytes - bitmap font converter for microcontrollers
#[derive(Parser, Debug)]
#[command(name = "font-to-bytes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a font image into a byte array
    Convert {
        /// Font image (PNG or any format the image crate decodes)
        image: PathBuf,

        /// Cell size and direction, e.g. 8x8, 8x8-lr, 10x16
        #[arg(long)]
        mode: Option<Mode>,

        /// Output format: arduino or cpp
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Invert all bits
        #[arg(long, overrides_with = "no_invert")]
        invert: bool,

        /// Do not invert bits, even if the settings say so
        #[arg(long, overrides_with = "invert")]
        no_invert: bool,

        /// Reverse the bit order of each byte
        #[arg(long, overrides_with = "no_reverse")]
        reverse: bool,

        /// Keep the normal bit order, even if the settings say otherwise
        #[arg(long, overrides_with = "reverse")]
        no_reverse: bool,

        /// Write the source to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Store the effective options as the new defaults
        #[arg(long)]
        save_settings: bool,
    },

    /// Render a character chart of a font image as PNG
    Chart {
        /// Font image
        image: PathBuf,

        /// Cell size and direction, e.g. 8x8, 8x8-lr, 10x16
        #[arg(long)]
        mode: Option<Mode>,

        /// Output PNG file
        #[arg(long, short, value_name = "FILE", default_value = "chart.png")]
        output: PathBuf,

        /// Size of one glyph pixel in the chart (1-64)
        #[arg(long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..=MAX_PIXEL_SIZE as i64))]
        pixel_size: u32,
    },

    /// List available modes and output formats
    Modes,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        match &e {
            FontError::Convert(err) => {
                eprintln!("Error: {}", err.summary());
                eprintln!("{}", err.details());
            }
            _ => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<(), FontError> {
    let cli = Cli::parse();
    let settings_path = cli.settings.unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load_or_default(&settings_path);

    match cli.command {
        Commands::Convert {
            image,
            mode,
            format,
            invert,
            no_invert,
            reverse,
            no_reverse,
            output,
            save_settings,
        } => {
            settings.apply_overrides(
                mode,
                format,
                flag(invert, no_invert),
                flag(reverse, no_reverse),
            );

            let pixels = ImagePixels::open(&image)?;
            let mut generator =
                SourceCodeGenerator::new(settings.output_format, settings.encoding_options());
            let grid = settings.mode.converter().convert(&pixels, &mut generator)?;
            log::info!(
                "Converted {} characters using {} ({})",
                grid.count(),
                settings.mode.title(),
                settings.output_format.title()
            );

            let code = generator.into_source_code();
            match output {
                Some(path) => {
                    std::fs::write(&path, &code)?;
                    log::info!("Saved to {}", path.display());
                }
                None => print!("{}", code),
            }

            if save_settings {
                settings.save(&settings_path)?;
            }
        }
        Commands::Chart {
            image,
            mode,
            output,
            pixel_size,
        } => {
            let mode = mode.unwrap_or(settings.mode);
            let pixels = ImagePixels::open(&image)?;
            ChartSheet::new(pixel_size).save(&pixels, mode.geometry(), &output)?;
        }
        Commands::Modes => {
            println!("Available modes:");
            for mode in Mode::PRESETS {
                println!("  {:<10} {}", mode.to_string(), mode.title());
            }
            println!("  {:<10} W×H Fixed Top-Down (any cell size)", "WxH");
            println!("  {:<10} W×H Fixed Left-Right (any cell size)", "WxH-lr");
            println!("\nAvailable output formats:");
            for format in OutputFormat::ALL {
                println!("  {:<10} {}", format.to_string(), format.title());
            }
        }
    }

    Ok(())
}

/// Collapse a `--x` / `--no-x` pair into an explicit choice, if any.
fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
