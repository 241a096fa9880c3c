use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    cli::{Cli, ThemeArg},
    scene::{ColorParseError, Palette, Rgb},
    ui::theme::palette_for,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionSetting {
    #[default]
    Full,
    /// Clouds and stars hold still.
    Reduced,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("reading {path} failed")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing {path} failed")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("palette field `{field}` is invalid")]
    InvalidColor {
        field: &'static str,
        #[source]
        source: ColorParseError,
    },
}

/// Palette fields that replace the theme's colors when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteOverride {
    pub sky_top: Option<String>,
    pub sky_bottom: Option<String>,
    pub cloud: Option<String>,
    pub hill: Option<String>,
    pub hill_far: Option<String>,
}

impl PaletteOverride {
    fn fields(&self) -> [(&'static str, Option<&String>); 5] {
        [
            ("sky_top", self.sky_top.as_ref()),
            ("sky_bottom", self.sky_bottom.as_ref()),
            ("cloud", self.cloud.as_ref()),
            ("hill", self.hill.as_ref()),
            ("hill_far", self.hill_far.as_ref()),
        ]
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in self.fields() {
            if let Some(value) = value {
                value
                    .parse::<Rgb>()
                    .map_err(|source| SettingsError::InvalidColor { field, source })?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn apply(&self, mut base: Palette) -> Palette {
        let pick = |slot: &mut String, value: &Option<String>| {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        };
        pick(&mut base.sky_top, &self.sky_top);
        pick(&mut base.sky_bottom, &self.sky_bottom);
        pick(&mut base.cloud, &self.cloud);
        pick(&mut base.hill, &self.hill);
        pick(&mut base.hill_far, &self.hill_far);
        base
    }

    #[must_use]
    pub fn merged_with(&self, over: &Self) -> Self {
        Self {
            sky_top: over.sky_top.clone().or_else(|| self.sky_top.clone()),
            sky_bottom: over.sky_bottom.clone().or_else(|| self.sky_bottom.clone()),
            cloud: over.cloud.clone().or_else(|| self.cloud.clone()),
            hill: over.hill.clone().or_else(|| self.hill.clone()),
            hill_far: over.hill_far.clone().or_else(|| self.hill_far.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub theme: ThemeArg,
    pub palette: PaletteOverride,
    pub show_hills: bool,
    pub motion: MotionSetting,
    pub fps: u8,
    pub clouds: Option<usize>,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            theme: ThemeArg::Day,
            palette: PaletteOverride::default(),
            show_hills: true,
            motion: MotionSetting::Full,
            fps: 20,
            clouds: None,
        }
    }
}

impl RuntimeSettings {
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        let mut settings = Self::default();
        settings.apply_cli(cli);
        settings
    }

    /// CLI flags win over whatever the settings file said, but only when the
    /// user actually changed them from their defaults.
    fn apply_cli(&mut self, cli: &Cli) {
        if cli.theme != ThemeArg::Day {
            self.theme = cli.theme;
        }
        if cli.no_hills {
            self.show_hills = false;
        }
        if cli.no_animation || cli.reduced_motion {
            self.motion = MotionSetting::Reduced;
        }
        if cli.fps != 20 {
            self.fps = cli.fps;
        }
        if cli.clouds.is_some() {
            self.clouds = cli.clouds;
        }
    }

    #[must_use]
    pub fn resolved_palette(&self) -> Palette {
        self.palette.apply(palette_for(self.theme))
    }

    #[must_use]
    pub fn cloud_count(&self, cols: usize) -> usize {
        self.clouds.unwrap_or_else(|| default_cloud_count(cols))
    }
}

#[must_use]
pub fn default_cloud_count(cols: usize) -> usize {
    (cols / 12).max(3)
}

pub fn load_runtime_settings(cli: &Cli, path: Option<&Path>) -> anyhow::Result<RuntimeSettings> {
    let mut settings = RuntimeSettings::default();

    if let Some(path) = path.filter(|p| p.exists()) {
        match read_settings_file(path) {
            Ok(saved) => settings = saved,
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "ignoring unreadable settings file");
            }
        }
    }

    settings.apply_cli(cli);

    if let Some(palette_path) = &cli.palette {
        let overrides = load_palette_file(palette_path)
            .with_context(|| format!("loading palette {}", palette_path.display()))?;
        settings.palette = settings.palette.merged_with(&overrides);
    }

    Ok(settings)
}

pub fn read_settings_file(path: &Path) -> Result<RuntimeSettings, SettingsError> {
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: RuntimeSettings =
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    settings.palette.validate()?;
    Ok(settings)
}

pub fn load_palette_file(path: &Path) -> Result<PaletteOverride, SettingsError> {
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let palette: PaletteOverride =
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    palette.validate()?;
    Ok(palette)
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

/// Store the in-app toggles on top of what the settings file already holds.
///
/// Only `theme` and `show_hills` are written; overrides that came from the
/// command line for this run never reach the file.
pub fn save_toggled_settings(
    path: &Path,
    theme: ThemeArg,
    show_hills: bool,
) -> anyhow::Result<()> {
    let mut stored = if path.exists() {
        read_settings_file(path).unwrap_or_else(|err| {
            tracing::warn!(error = %err, path = %path.display(), "replacing unreadable settings file");
            RuntimeSettings::default()
        })
    } else {
        RuntimeSettings::default()
    };
    stored.theme = theme;
    stored.show_hills = show_hills;
    save_runtime_settings(path, &stored)
}

pub fn settings_path() -> Option<PathBuf> {
    settings_path_from(
        std::env::var_os("ASCII_SKY_CONFIG_DIR"),
        std::env::var_os("HOME"),
    )
}

pub(crate) fn settings_path_from(
    config_dir: Option<OsString>,
    home: Option<OsString>,
) -> Option<PathBuf> {
    if let Some(base) = config_dir {
        return Some(PathBuf::from(base).join("settings.json"));
    }
    let home = home?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("ascii-sky")
            .join("settings.json"),
    )
}
