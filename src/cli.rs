#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum FormatArg {
    #[default]
    Html,
    Text,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeArg {
    Dawn,
    #[default]
    Day,
    Dusk,
    Night,
    Mono,
}

impl ThemeArg {
    pub const ALL: [Self; 5] = [Self::Dawn, Self::Day, Self::Dusk, Self::Night, Self::Mono];

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "ascii-sky",
    version,
    about = "Procedural ASCII sky with drifting clouds and hills"
)]
pub struct Cli {
    /// Grid width (defaults to terminal width, or 80 with --one-shot)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub cols: Option<u16>,

    /// Grid height (defaults to terminal height, or 24 with --one-shot)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub rows: Option<u16>,

    /// Number of clouds (default: one per 12 columns, at least 3)
    #[arg(long)]
    pub clouds: Option<usize>,

    /// Target FPS (5..60)
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u8).range(5..=60))]
    pub fps: u8,

    /// Hide the hill silhouette
    #[arg(long)]
    pub no_hills: bool,

    /// Palette preset
    #[arg(long, value_enum, default_value_t = ThemeArg::Day)]
    pub theme: ThemeArg,

    /// JSON palette file overriding the theme
    #[arg(long)]
    pub palette: Option<PathBuf>,

    /// Freeze clouds in place
    #[arg(long)]
    pub no_animation: bool,

    /// Lower motion mode
    #[arg(long)]
    pub reduced_motion: bool,

    /// Color output policy
    #[arg(long, value_enum, default_value_t = ColorArg::Auto, conflicts_with = "no_color")]
    pub color: ColorArg,

    /// Alias for --color never
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// Print a single frame to stdout and exit
    #[arg(long)]
    pub one_shot: bool,

    /// Output format for --one-shot
    #[arg(long, value_enum, default_value_t = FormatArg::Html, requires = "one_shot")]
    pub format: FormatArg,

    /// Scene time in seconds for --one-shot
    #[arg(long, default_value_t = 0.0, requires = "one_shot")]
    pub time: f64,

    /// Write tracing output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.time.is_finite() || self.time < 0.0 {
            anyhow::bail!("--time must be a non-negative number");
        }
        if self.clouds.is_some_and(|n| n > 10_000) {
            anyhow::bail!("--clouds must be at most 10000");
        }
        Ok(())
    }

    #[must_use]
    pub fn effective_color_mode(&self) -> ColorArg {
        if self.no_color {
            ColorArg::Never
        } else {
            self.color
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, ColorArg, FormatArg, ThemeArg};

    #[test]
    fn defaults_are_sensible() {
        let cli = Cli::parse_from(["ascii-sky"]);
        assert_eq!(cli.fps, 20);
        assert_eq!(cli.theme, ThemeArg::Day);
        assert_eq!(cli.format, FormatArg::Html);
        assert!(cli.cols.is_none());
        assert!(!cli.no_hills);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn parses_one_shot_options() {
        let cli = Cli::parse_from([
            "ascii-sky",
            "--one-shot",
            "--cols",
            "40",
            "--rows",
            "12",
            "--format",
            "text",
            "--time",
            "3.5",
        ]);
        assert!(cli.one_shot);
        assert_eq!(cli.cols, Some(40));
        assert_eq!(cli.rows, Some(12));
        assert_eq!(cli.format, FormatArg::Text);
        assert!((cli.time - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn format_requires_one_shot() {
        assert!(Cli::try_parse_from(["ascii-sky", "--format", "text"]).is_err());
    }

    #[test]
    fn rejects_zero_sized_grid() {
        assert!(Cli::try_parse_from(["ascii-sky", "--cols", "0"]).is_err());
        assert!(Cli::try_parse_from(["ascii-sky", "--rows", "0"]).is_err());
    }

    #[test]
    fn rejects_fps_out_of_range() {
        assert!(Cli::try_parse_from(["ascii-sky", "--fps", "2"]).is_err());
        assert!(Cli::try_parse_from(["ascii-sky", "--fps", "61"]).is_err());
    }

    #[test]
    fn rejects_color_and_no_color_together() {
        let err = Cli::try_parse_from(["ascii-sky", "--color", "always", "--no-color"])
            .expect_err("expected conflict");
        let rendered = err.to_string();
        assert!(rendered.contains("--color"));
        assert!(rendered.contains("--no-color"));
    }

    #[test]
    fn effective_color_mode_prefers_no_color() {
        let cli = Cli::parse_from(["ascii-sky", "--no-color"]);
        assert_eq!(cli.effective_color_mode(), ColorArg::Never);

        let cli = Cli::parse_from(["ascii-sky", "--color", "always"]);
        assert_eq!(cli.effective_color_mode(), ColorArg::Always);

        let cli = Cli::parse_from(["ascii-sky"]);
        assert_eq!(cli.effective_color_mode(), ColorArg::Auto);
    }

    #[test]
    fn validate_rejects_negative_time() {
        let mut cli = Cli::parse_from(["ascii-sky", "--one-shot"]);
        cli.time = -1.0;
        assert!(cli.validate().is_err());
    }

    #[test]
    fn theme_cycle_visits_every_preset() {
        let mut theme = ThemeArg::Dawn;
        let mut seen = Vec::new();
        for _ in 0..ThemeArg::ALL.len() {
            seen.push(theme);
            theme = theme.next();
        }
        assert_eq!(theme, ThemeArg::Dawn);
        assert_eq!(seen, ThemeArg::ALL);
    }
}
