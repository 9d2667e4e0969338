use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::state::App;
use crate::ui::renderer::{ShopWidget, YardWidget};

impl App {
    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.last_yard_rect = chunks[0];
        frame.render_widget(YardWidget::new(&self.sim), chunks[0]);
        frame.render_widget(ShopWidget::new(&self.sim, self.upgrade_target), chunks[1]);

        if let Some((message, color)) = self.event_log.back() {
            let line = Line::styled(message.clone(), Style::default().fg(*color));
            frame.render_widget(Paragraph::new(line), chunks[2]);
        }
    }
}
