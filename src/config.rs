use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::drawing::{DrawOptions, Style};
use crate::projection::DEFAULT_WIDTH;

/// Turns GPX tracks into an SVG art piece.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["inputs", "input"])))]
pub struct Config {
    /// Write the SVG to this file.
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// GPX files, each drawn as its own track.
    #[arg(value_name = "GPX")]
    pub inputs: Vec<PathBuf>,

    /// Directory holding one subdirectory of GPX files per person.
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Width of the drawing, in SVG units.
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    pub width: f64,

    /// Seed for the track colors, for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Draw every point as one black line instead of one colored line per track.
    #[arg(long, default_value_t = false)]
    pub single: bool,

    /// Verbose logging (DEBUG level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Also log to this file, rotated every 1000 lines.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn draw_options(&self) -> DrawOptions {
        DrawOptions {
            width: self.width,
            style: if self.single {
                Style::Single
            } else {
                Style::Grouped
            },
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn file_mode() {
        let config =
            Config::try_parse_from(["ski_art", "-o", "out.svg", "a.gpx", "b.gpx"]).unwrap();
        assert_eq!(config.output, PathBuf::from("out.svg"));
        assert_eq!(
            config.inputs,
            vec![PathBuf::from("a.gpx"), PathBuf::from("b.gpx")]
        );
        assert_eq!(config.input, None);
        assert_eq!(config.draw_options(), DrawOptions::default());
    }

    #[test]
    fn directory_mode_with_options() {
        let config = Config::try_parse_from([
            "ski_art", "--output", "out.svg", "-i", "people", "--width", "500", "--seed", "9",
            "--single",
        ])
        .unwrap();
        assert_eq!(config.input, Some(PathBuf::from("people")));
        assert!(config.inputs.is_empty());
        let options = config.draw_options();
        assert_eq!(options.width, 500.0);
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.style, Style::Single);
    }

    #[test]
    fn usage_errors() {
        let kind = |args: &[&str]| Config::try_parse_from(args).unwrap_err().kind();
        assert_eq!(
            kind(&["ski_art", "a.gpx"]),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            kind(&["ski_art", "-o", "out.svg"]),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            kind(&["ski_art", "-o", "out.svg", "-i", "people", "a.gpx"]),
            ErrorKind::ArgumentConflict
        );
    }
}
