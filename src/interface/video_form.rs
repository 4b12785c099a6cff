use super::component::Frame;
use crate::{
    backend::CreateMode,
    manager::form::{CreateForm, FormField},
};

use crossterm::event::{KeyCode, KeyEvent};
use tui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
};

#[derive(Debug, PartialEq, Eq)]
pub enum FormOutcome {
    Editing,
    Submit,
    Leave,
}

/// The "Add video" panel. Field contents live in the manager's state, this
/// only tracks which field has focus.
pub struct VideoForm {
    field: FormField,
    mode: CreateMode,
}

impl VideoForm {
    pub fn new(mode: CreateMode) -> Self {
        Self {
            field: FormField::Title,
            mode,
        }
    }

    pub fn focus_first(&mut self) {
        self.field = FormField::Title;
    }

    fn source_label(&self) -> &'static str {
        match self.mode {
            CreateMode::Url => "Video Source URL",
            CreateMode::File => "Video File",
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, form: &mut CreateForm) -> FormOutcome {
        match key.code {
            KeyCode::Esc => return FormOutcome::Leave,
            KeyCode::Enter => return FormOutcome::Submit,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.field = self.field.next()
            }
            KeyCode::Backspace => {
                form.field_mut(self.field).pop();
            }
            KeyCode::Char(c) => form.field_mut(self.field).push(c),
            _ => (),
        }
        FormOutcome::Editing
    }

    pub fn paste(&mut self, text: &str, form: &mut CreateForm) {
        form.field_mut(self.field)
            .extend(text.chars().filter(|c| !c.is_control()));
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, form: &CreateForm, focused: bool) {
        let border_color = if focused { Color::Green } else { Color::DarkGray };
        let block = Block::default()
            .title("Add Video")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)].as_ref())
            .split(inner);

        let fields = [
            (FormField::Title, "Video Title", &form.title),
            (FormField::Source, self.source_label(), &form.source),
        ];
        for ((field, label, value), row) in fields.into_iter().zip(rows) {
            let active = focused && field == self.field;
            let label_style = if active {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };
            let line = Spans::from(vec![
                Span::styled(format!("{label:>18}: "), label_style),
                Span::styled(value.as_str(), Style::default().fg(Color::White)),
            ]);
            f.render_widget(Paragraph::new(line), row);

            if active {
                let offset = u16::try_from(20 + value.chars().count()).unwrap_or(u16::MAX);
                f.set_cursor((row.x + offset).min(row.x + row.width.saturating_sub(1)), row.y);
            }
        }
    }
}
