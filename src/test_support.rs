use clap::Parser;

use crate::{
    app::settings::RuntimeSettings,
    cli::Cli,
    scene::{Cloud, Palette},
};

pub(crate) fn test_cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("ascii-sky").chain(args.iter().copied()))
}

pub(crate) fn still_settings() -> RuntimeSettings {
    RuntimeSettings {
        clouds: Some(2),
        ..RuntimeSettings::default()
    }
}

pub(crate) fn gray_palette() -> Palette {
    Palette {
        sky_top: "#000000".to_string(),
        sky_bottom: "#646464".to_string(),
        cloud: "#ffffff".to_string(),
        hill: "#00ff00".to_string(),
        hill_far: "#0000ff".to_string(),
    }
}

pub(crate) fn cloud(x: f64, y: f64) -> Cloud {
    Cloud {
        x,
        y,
        rx: 8.0,
        ry: 2.0,
        speed: 3.0,
        density: 0.8,
    }
}
