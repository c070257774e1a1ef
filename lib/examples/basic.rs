/// Basic example: Convert a synthetic test image to ASCII art
///
/// Usage: cargo run --example basic -- [--font FONT_PATH] [--size N] [--chars STR]
/// Without a font path, $GLYPHTONE_FONT or a common system monospace face is used.
use clap::Parser;
use glyphtone::{
    AsciiConfig, CancellationToken, ConversionRequest, FontSpec, FontdueRasterizer, convert,
};
use image::{Rgb, RgbImage};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "basic", about = "Convert a synthetic test image to ASCII art")]
struct Args {
    /// TrueType/OpenType monospace font
    #[arg(short, long)]
    font: Option<PathBuf>,
    /// Font size in points
    #[arg(short, long, default_value_t = 8)]
    size: u32,
    /// Allowed characters, in tie-break order
    #[arg(long)]
    chars: Option<String>,
    /// Where to write the ASCII raster
    #[arg(short, long, default_value = "basic_output.png")]
    output: PathBuf,
}

fn main() -> glyphtone::Result<()> {
    let args = Args::parse();

    println!("glyphtone - Basic Example");
    println!("=========================\n");

    let mut config = AsciiConfig {
        font_path: args.font,
        font_size: args.size,
        ..Default::default()
    };
    if let Some(chars) = args.chars {
        config.characters = chars;
    }
    config.validate()?;
    let Some(font_path) = config.resolve_font_path() else {
        eprintln!("No font found: pass --font or set GLYPHTONE_FONT");
        std::process::exit(1);
    };

    // Create a 320x240 test image: vertical gradient with a bright disc
    let width = 320;
    let height = 240;
    let mut img = RgbImage::new(width, height);
    let (cx, cy, radius) = (width as f32 / 2.0, height as f32 / 2.0, 70.0);

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let pixel = if (dx * dx + dy * dy).sqrt() < radius {
                Rgb([250, 240, 200])
            } else {
                let v = (y * 180 / height) as u8;
                Rgb([v / 2, v, 40])
            };
            img.put_pixel(x, y, pixel);
        }
    }

    println!("Created test image: {}x{}", width, height);
    println!("Font: {}", font_path.display());

    let face = Arc::new(FontdueRasterizer::from_path(&font_path)?);
    let font = FontSpec::new(face, config.font_size)?;
    let request = ConversionRequest::new(config.characters.as_str(), font, Arc::new(img.clone()));

    let result = convert(&request, &CancellationToken::new())?;

    println!(
        "Cell {}x{}, grid {}x{}, warnings: {:?}",
        result.geometry.width, result.geometry.height, result.columns, result.rows, result.warnings
    );

    img.save("basic_input.png")?;
    result.image.save(&args.output)?;

    println!("✓ Saved input to:  basic_input.png");
    println!("✓ Saved output to: {}", args.output.display());
    println!("\nASCII conversion complete!");
    Ok(())
}
