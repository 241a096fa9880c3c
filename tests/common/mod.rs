#![allow(dead_code)]

use ascii_sky::{
    app::settings::RuntimeSettings,
    cli::Cli,
    scene::{Cloud, Palette, SceneConfig},
};
use clap::Parser;
use regex::Regex;

pub fn cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("ascii-sky").chain(args.iter().copied()))
}

pub fn fixed_settings() -> RuntimeSettings {
    RuntimeSettings {
        clouds: Some(6),
        ..RuntimeSettings::default()
    }
}

pub fn scene<'a>(
    cols: usize,
    rows: usize,
    clouds: &'a [Cloud],
    palette: &'a Palette,
    time: f64,
) -> SceneConfig<'a> {
    SceneConfig {
        cols,
        rows,
        clouds,
        show_hills: true,
        palette,
        time,
    }
}

/// Drop every tag and decode entities, leaving only the rendered text.
pub fn strip_markup(html: &str) -> String {
    let tags = Regex::new(r"<[^>]*>").expect("valid tag regex");
    html_escape::decode_html_entities(&tags.replace_all(html, "")).into_owned()
}
