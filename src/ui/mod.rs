pub mod canvas;
pub mod theme;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::{app::state::AppState, scene::compute_scene};

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let grid = compute_scene(&state.scene_config());
    frame.render_widget(
        canvas::SkyCanvas {
            grid: &grid,
            palette: &state.palette,
            capability: state.capability,
        },
        area,
    );

    if state.paused {
        render_status_badge(frame, area, "paused");
    }
}

fn render_status_badge(frame: &mut Frame, area: Rect, text: &str) {
    let width = u16::try_from(text.chars().count() + 2)
        .unwrap_or(u16::MAX)
        .min(area.width);
    if width == 0 || area.height == 0 {
        return;
    }
    let badge_area = Rect {
        x: area.right().saturating_sub(width + 1).max(area.x),
        y: area.y,
        width,
        height: 1,
    };
    let badge = Paragraph::new(Line::from(format!(" {text} "))).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(badge, badge_area);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::render;
    use crate::{app::state::AppState, test_support::still_settings, ui::theme::ColorCapability};

    fn draw(state: &AppState, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        terminal.draw(|frame| render(frame, state)).expect("draw");
        let buffer = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn renders_scene_rows() {
        let state = AppState::new(still_settings(), ColorCapability::TrueColor, 40, 12);
        let lines = draw(&state, 40, 12);
        assert_eq!(lines.len(), 12);
        let last = &lines[11];
        assert!(last.chars().any(|c| c != ' '), "hills expected on bottom row");
    }

    #[test]
    fn paused_badge_is_drawn() {
        let mut state = AppState::new(still_settings(), ColorCapability::TrueColor, 40, 12);
        state.toggle_pause();
        let lines = draw(&state, 40, 12);
        assert!(lines[0].contains("paused"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let state = AppState::new(still_settings(), ColorCapability::Off, 1, 1);
        let lines = draw(&state, 1, 1);
        assert_eq!(lines.len(), 1);
    }
}
