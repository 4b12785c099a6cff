use super::{
    component::Frame,
    dialog::centered,
};
use crate::manager::TitleInput;

use crossterm::event::{KeyCode, KeyEvent};
use tui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Single-line text input shown over the list. Resolves to a `TitleInput`
/// once the user submits or cancels.
pub struct Prompt {
    title: String,
    input: String,
}

impl Prompt {
    pub fn new(title: &str, initial: &str) -> Self {
        Self {
            title: title.to_owned(),
            input: initial.to_owned(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<TitleInput> {
        match key.code {
            KeyCode::Enter => Some(TitleInput::Submitted(std::mem::take(&mut self.input))),
            KeyCode::Esc => Some(TitleInput::Cancelled),
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }

    pub fn paste(&mut self, text: &str) {
        self.input.extend(text.chars().filter(|c| !c.is_control()));
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let area = centered(area, 60, 3);
        let inner_width = usize::from(area.width.saturating_sub(2));

        // Keep the end of long input visible.
        let skip = self.input.chars().count().saturating_sub(inner_width.saturating_sub(1));
        let visible: String = self.input.chars().skip(skip).collect();
        let cursor_x = area.x + 1 + u16::try_from(visible.chars().count()).unwrap_or(0);

        let prompt = Paragraph::new(visible)
            .block(
                Block::default()
                    .title(&*self.title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .style(Style::default().fg(Color::White).bg(Color::Black));

        f.render_widget(Clear, area);
        f.render_widget(prompt, area);
        f.set_cursor(cursor_x, area.y + 1);
    }
}
