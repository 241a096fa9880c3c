use std::{path::PathBuf, time::Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    app::{
        events::AppEvent,
        settings::{MotionSetting, RuntimeSettings, save_toggled_settings},
    },
    scene::{Cloud, Palette, SceneConfig, advance_clouds, generate_initial_clouds},
    ui::theme::ColorCapability,
};

/// Longest step a single frame may advance, so a stalled terminal does not
/// teleport the clouds.
const MAX_FRAME_DT: f64 = 0.25;

#[derive(Debug)]
pub struct AppState {
    pub running: bool,
    pub paused: bool,
    pub settings: RuntimeSettings,
    pub palette: Palette,
    pub capability: ColorCapability,
    pub cols: usize,
    pub rows: usize,
    pub clouds: Vec<Cloud>,
    /// Seconds of animated time, frozen while paused.
    pub elapsed: f64,
    pub last_frame_at: Instant,
    settings_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(
        settings: RuntimeSettings,
        capability: ColorCapability,
        cols: usize,
        rows: usize,
    ) -> Self {
        let palette = settings.resolved_palette();
        let clouds = generate_initial_clouds(cols, rows, settings.cloud_count(cols));
        Self {
            running: true,
            paused: false,
            settings,
            palette,
            capability,
            cols,
            rows,
            clouds,
            elapsed: 0.0,
            last_frame_at: Instant::now(),
            settings_path: None,
        }
    }

    #[must_use]
    pub fn with_settings_path(mut self, path: Option<PathBuf>) -> Self {
        self.settings_path = path;
        self
    }

    #[must_use]
    pub fn animating(&self) -> bool {
        self.settings.motion == MotionSetting::Full && !self.paused
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::TickFrame => self.tick(Instant::now()),
            AppEvent::Input(Event::Key(key)) => self.handle_key(key),
            AppEvent::Input(Event::Resize(cols, rows)) => {
                self.resize(usize::from(cols), usize::from(rows));
            }
            AppEvent::Input(_) => {}
            AppEvent::Quit => self.running = false,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        let dt = now
            .saturating_duration_since(self.last_frame_at)
            .as_secs_f64()
            .clamp(0.0, MAX_FRAME_DT);
        self.last_frame_at = now;
        self.advance(dt);
    }

    pub fn advance(&mut self, dt: f64) {
        if !self.animating() {
            return;
        }
        self.clouds = advance_clouds(&self.clouds, dt, self.cols);
        self.elapsed += dt;
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        if (cols, rows) == (self.cols, self.rows) {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.clouds = generate_initial_clouds(cols, rows, self.settings.cloud_count(cols));
        tracing::debug!(cols, rows, clouds = self.clouds.len(), "regenerated clouds");
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        tracing::debug!(paused = self.paused, "toggled pause");
    }

    pub fn toggle_hills(&mut self) {
        self.settings.show_hills = !self.settings.show_hills;
        self.persist();
    }

    pub fn cycle_theme(&mut self) {
        self.settings.theme = self.settings.theme.next();
        self.palette = self.settings.resolved_palette();
        tracing::debug!(theme = ?self.settings.theme, "switched theme");
        self.persist();
    }

    #[must_use]
    pub fn scene_config(&self) -> SceneConfig<'_> {
        SceneConfig {
            cols: self.cols,
            rows: self.rows,
            clouds: &self.clouds,
            show_hills: self.settings.show_hills,
            palette: &self.palette,
            time: self.elapsed,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if matches!(key.code, KeyCode::Char('c' | 'C')) {
                self.running = false;
            }
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => self.running = false,
            KeyCode::Char(' ') => self.toggle_pause(),
            KeyCode::Char('h' | 'H') => self.toggle_hills(),
            KeyCode::Char('t' | 'T') => self.cycle_theme(),
            _ => {}
        }
    }

    fn persist(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(err) =
            save_toggled_settings(path, self.settings.theme, self.settings.show_hills)
        {
            tracing::warn!(error = %err, path = %path.display(), "saving settings failed");
        }
    }
}
