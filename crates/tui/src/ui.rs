//! Rendering: one list per stage, or a full-screen message once a fetch
//! has failed.

use ratatui::layout::Margin;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area().inner(Margin {
        horizontal: 2,
        vertical: 1,
    });

    if let Some(err) = app.error() {
        frame.render_widget(
            Paragraph::new(format!("\nWe had some trouble: {err}\n")),
            area,
        );
        return;
    }

    app.current_list_mut().render(frame, area);
}
