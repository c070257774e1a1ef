/// Print the measured brightness of every character at a range of sizes
///
/// Usage: cargo run --example profile_dump -- [--font FONT_PATH] [--chars STR]
use clap::Parser;
use glyphtone::font::CellGeometry;
use glyphtone::profile::profile_glyphs;
use glyphtone::{AsciiConfig, CharacterSet, FontSpec, FontdueRasterizer, GlyphRasterizer};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "profile_dump", about = "Print glyph brightness for every slider size")]
struct Args {
    /// TrueType/OpenType monospace font
    #[arg(short, long)]
    font: Option<PathBuf>,
    /// Characters to measure
    #[arg(long, default_value = " .:-=+*#%@")]
    chars: String,
}

fn main() -> glyphtone::Result<()> {
    let args = Args::parse();
    let config = AsciiConfig {
        font_path: args.font,
        characters: args.chars,
        ..Default::default()
    };
    let Some(font_path) = config.resolve_font_path() else {
        eprintln!("No font found: pass --font or set GLYPHTONE_FONT");
        std::process::exit(1);
    };

    let face: Arc<dyn GlyphRasterizer> = Arc::new(FontdueRasterizer::from_path(&font_path)?);
    let characters = CharacterSet::new(&config.characters);
    println!("Face '{}' from {}", face.family(), font_path.display());

    for size in AsciiConfig::FONT_SIZE_RANGE_GUI {
        let font = FontSpec::new(Arc::clone(&face), size)?;
        let metrics = font.metrics();
        let cell = CellGeometry::from_metrics(&metrics);
        let profile = profile_glyphs(&characters, &font, &metrics);

        print!("{size:>2}pt cell {:>2}x{:<2} |", cell.width, cell.height);
        for (ch, brightness) in characters.iter().zip(profile.values()) {
            print!(" {ch}:{brightness:<3}");
        }
        println!();
    }
    Ok(())
}
