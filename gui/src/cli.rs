use clap::Parser;
use glyphtone::AsciiConfig;
use std::path::PathBuf;

/// glyphtone - photograph to ASCII-art converter
#[derive(Parser, Debug)]
#[command(name = "glyphtone", version, about, long_about = None)]
pub struct Cli {
    /// Image to open at start-up
    pub image: Option<PathBuf>,

    /// TOML configuration file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// TrueType/OpenType monospace font
    #[arg(short, long)]
    pub font: Option<PathBuf>,

    /// Font size in points
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Allowed characters, in tie-break order
    #[arg(long)]
    pub chars: Option<String>,
}

impl Cli {
    /// Configuration from `--config`, with the other flags applied on top
    pub fn resolve_config(&self) -> glyphtone::Result<AsciiConfig> {
        let mut config = match &self.config {
            Some(path) => AsciiConfig::load(path)?,
            None => AsciiConfig::default(),
        };

        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }
        if let Some(size) = self.size {
            config.font_size = size;
        }
        if let Some(chars) = &self.chars {
            config.characters = chars.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_no_arguments_gives_defaults() {
        let cli = Cli::try_parse_from(["glyphtone"]).unwrap();
        assert!(cli.image.is_none());
        assert_eq!(cli.resolve_config().unwrap(), AsciiConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "glyphtone",
            "photo.png",
            "--font",
            "/fonts/mono.ttf",
            "--size",
            "11",
            "--chars",
            " .#",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(cli.image, Some(PathBuf::from("photo.png")));
        assert_eq!(config.font_path, Some(PathBuf::from("/fonts/mono.ttf")));
        assert_eq!(config.font_size, 11);
        assert_eq!(config.characters, " .#");
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "font_size = 5\ncharacters = \"ab\"").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["glyphtone", "--config", path, "--size", "9"]).unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.font_size, 9);
        assert_eq!(config.characters, "ab");
    }

    #[test]
    fn test_empty_chars_are_allowed() {
        let cli = Cli::try_parse_from(["glyphtone", "--chars", ""]).unwrap();
        assert_eq!(cli.resolve_config().unwrap().characters, "");
    }

    #[test]
    fn test_out_of_range_size_is_rejected() {
        let cli = Cli::try_parse_from(["glyphtone", "--size", "0"]).unwrap();
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["glyphtone", "-c", "/nonexistent/glyphtone.toml"]).unwrap();
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn test_help_is_handled_by_clap() {
        let err = Cli::try_parse_from(["glyphtone", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
