//! Command-line front end: load a photo and a product image, place the
//! product, and export the result as JPEG.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tryon_lib::session::TryOnSession;

#[derive(Parser, Debug)]
#[command(author, version, about = "Try a product image on over your photo")]
struct Args {
    /// Your photo (JPG or PNG)
    #[arg(long, required_unless_present = "show_settings")]
    base: Option<PathBuf>,

    /// Product image, e.g. glasses or a dress (PNG with transparency works best)
    #[arg(long, required_unless_present = "show_settings")]
    overlay: Option<PathBuf>,

    /// Horizontal position of the product's center (default: photo center)
    #[arg(short, long, allow_negative_numbers = true)]
    x: Option<i64>,

    /// Vertical position of the product's center (default: photo center)
    #[arg(short, long, allow_negative_numbers = true)]
    y: Option<i64>,

    /// Product scale in percent
    #[arg(short, long)]
    scale: Option<u32>,

    /// Output file (default: TRYON_OUTPUT_FILE)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JPEG quality (default: TRYON_JPEG_QUALITY)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,

    /// Print a JSON report of the render to stdout
    #[arg(long)]
    json: bool,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    show_settings: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = tryon_lib::init_foundation()?;

    if args.show_settings {
        let settings = tryon_lib::config::describe_settings(&config);
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    let (Some(base), Some(overlay)) = (args.base, args.overlay) else {
        anyhow::bail!("both --base and --overlay are required");
    };

    let session = TryOnSession::open(&base, &overlay)?;
    let controls = session.controls(&config, args.x, args.y, args.scale);
    let output = args.output.unwrap_or_else(|| config.output_file.clone());
    let quality = args.quality.unwrap_or(config.jpeg_quality);

    let report = session.export(&controls, &output, quality)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Wrote: {}", report.output.display());
    }
    Ok(())
}
