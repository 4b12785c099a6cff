use super::{
    actions::Actions,
    component::{Component, Frame},
    dialog::Dialog,
    list::{generate_items, Cursor},
    prompt::Prompt,
    status_label::LOADING_STRING,
    video_form::{FormOutcome, VideoForm},
};
use crate::{
    backend::{VideoApi, VideoId, VideoRecord},
    manager::{state::LoadStatus, ManagerError, TitleInput, VideoListManager},
};

use crossterm::event::{Event, KeyCode, KeyEvent};
use delegate::delegate;
use tui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, List, Paragraph},
};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Focus {
    List,
    Form,
}

pub struct VideoView<A> {
    actions: Actions,
    manager: VideoListManager<A>,
    cursor: Cursor,
    form: VideoForm,
    focus: Focus,
    prompt: Option<(VideoId, Prompt)>,
}

fn with_context(result: Result<(), ManagerError>, context: &str) -> Result<(), String> {
    result.map_err(|error| match error {
        ManagerError::Validation(error) => error.to_string(),
        ManagerError::Backend(error) => format!("{context} {error}"),
    })
}

impl<A: VideoApi + 'static> VideoView<A> {
    pub fn new(actions: Actions, manager: VideoListManager<A>) -> Self {
        let video_view = Self {
            actions,
            form: VideoForm::new(manager.mode()),
            manager,
            cursor: Cursor::default(),
            focus: Focus::List,
            prompt: None,
        };

        video_view.load();
        video_view
    }

    delegate! {
        to self.cursor {
            fn move_up(&mut self, length: usize);
            fn move_down(&mut self, length: usize);
            fn move_top(&mut self);
            fn move_bottom(&mut self, length: usize);
        }
    }

    fn video_count(&self) -> usize {
        self.manager.with_state(|state| state.videos().len())
    }

    fn selected_video(&self) -> Option<VideoRecord> {
        self.manager.with_state(|state| {
            let videos = state.videos();
            self.cursor
                .current(videos.len())
                .map(|index| videos[index].clone())
        })
    }

    fn load(&self) {
        let finish_loading = self.actions.show_label(LOADING_STRING);
        let manager = self.manager.clone();
        let actions = self.actions.clone();

        tokio::spawn(async move {
            // Load failures are logged by the manager and shown in place of the list.
            let _ = manager.load_all().await;
            finish_loading();
            actions.redraw_async().await;
        });
    }

    fn submit(&self) {
        let finish_status = self.actions.show_label("Adding video...");
        let manager = self.manager.clone();
        let actions = self.actions.clone();

        tokio::spawn(async move {
            let result = manager.submit_form().await;
            finish_status();
            actions
                .redraw_or_error_async(
                    with_context(result, "There was an error adding the video."),
                    true,
                )
                .await;
        });
    }

    fn delete_selected(&self) {
        let Some(video) = self.selected_video() else { return };
        let finish_status = self.actions.show_label("Deleting...");
        let manager = self.manager.clone();
        let actions = self.actions.clone();

        tokio::spawn(async move {
            let result = manager.delete_video(&video.id).await;
            finish_status();
            actions
                .redraw_or_error_async(
                    with_context(result, "There was an error deleting the video."),
                    true,
                )
                .await;
        });
    }

    fn open_edit_prompt(&mut self) {
        if let Some(video) = self.selected_video() {
            self.prompt = Some((video.id, Prompt::new("New title", &video.title)));
        }
    }

    fn edit(&self, id: VideoId, input: TitleInput) {
        if input == TitleInput::Cancelled {
            return;
        }

        let finish_status = self.actions.show_label("Saving...");
        let manager = self.manager.clone();
        let actions = self.actions.clone();

        tokio::spawn(async move {
            let result = manager.edit_video(&id, input).await;
            finish_status();
            actions
                .redraw_or_error_async(
                    with_context(result, "There was an error updating the video."),
                    true,
                )
                .await;
        });
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Some((id, prompt)) = self.prompt.as_mut() {
            if let Some(input) = prompt.handle_key(key) {
                let id = id.clone();
                self.prompt = None;
                self.edit(id, input);
            }
        } else if self.focus == Focus::Form {
            let form = &mut self.form;
            match self.manager.update_form(|fields| form.handle_key(key, fields)) {
                FormOutcome::Submit => self.submit(),
                FormOutcome::Leave => self.focus = Focus::List,
                FormOutcome::Editing => (),
            }
        } else {
            let length = self.video_count();
            match key.code {
                KeyCode::Char('q') => return self.actions.quit(),
                KeyCode::Up | KeyCode::Char('k') => self.move_up(length),
                KeyCode::Down | KeyCode::Char('j') => self.move_down(length),
                KeyCode::Home | KeyCode::Char('g') => self.move_top(),
                KeyCode::End | KeyCode::Char('G') => self.move_bottom(length),
                KeyCode::Char('a') => {
                    self.focus = Focus::Form;
                    self.form.focus_first();
                }
                KeyCode::Char('e') => self.open_edit_prompt(),
                KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
                KeyCode::Char('r') => self.load(),
                _ => return,
            }
        }

        self.actions.redraw();
    }

    fn handle_paste(&mut self, text: &str) {
        if let Some((_, prompt)) = self.prompt.as_mut() {
            prompt.paste(text);
        } else if self.focus == Focus::Form {
            let form = &mut self.form;
            self.manager.update_form(|fields| form.paste(text, fields));
        } else {
            return;
        }

        self.actions.redraw();
    }

    fn draw_list(&self, f: &mut Frame, area: Rect) {
        let (items, count, status, in_flight) = self.manager.with_state(|state| {
            let videos = state.videos();
            let current = if self.focus == Focus::List {
                self.cursor.current(videos.len())
            } else {
                None
            };
            let height = usize::from(area.height.saturating_sub(2));
            let items = generate_items(height, current, videos, |video| match video.source {
                Some(ref source) => format!(" {}  ({source})", video.title),
                None => format!(" {}", video.title),
            });
            (items, videos.len(), state.status(), state.in_flight())
        });

        let title = match in_flight {
            0 => format!("Video List ({count})"),
            pending => format!("Video List ({count}, {pending} pending)"),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if self.focus == Focus::List {
                Color::Green
            } else {
                Color::DarkGray
            }));

        if count > 0 {
            let list = List::new(items)
                .block(block)
                .style(Style::default().fg(Color::White));
            f.render_widget(list, area);
            return;
        }

        let placeholder = match status {
            LoadStatus::NotLoaded | LoadStatus::Loading => {
                f.render_widget(block, area);
                Dialog::new("Loading videos...").draw(f, area);
                return;
            }
            LoadStatus::Failed => "Could not load videos. Press r to retry.",
            LoadStatus::Loaded => "No videos yet. Press a to add one.",
        };
        let paragraph = Paragraph::new(placeholder)
            .block(block)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }
}

impl<A: VideoApi + 'static> Component for VideoView<A> {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3)].as_ref())
            .split(area);

        let focused = self.focus == Focus::Form && self.prompt.is_none();
        self.manager
            .with_state(|state| self.form.draw(f, chunks[0], state.form(), focused));
        self.draw_list(f, chunks[1]);

        if let Some((_, ref prompt)) = self.prompt {
            prompt.draw(f, area);
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => self.handle_paste(&text),
            _ => (),
        }
    }

    fn registered_events(&self) -> Vec<(String, String)> {
        let events: &[(&str, &str)] = if self.prompt.is_some() {
            &[("Enter", "Save"), ("Esc", "Cancel")]
        } else if self.focus == Focus::Form {
            &[("Tab", "Next field"), ("Enter", "Add"), ("Esc", "Back")]
        } else {
            &[
                ("j", "Down"),
                ("k", "Up"),
                ("a", "Add"),
                ("e", "Edit"),
                ("d", "Delete"),
                ("r", "Reload"),
                ("q", "Quit"),
            ]
        };

        events
            .iter()
            .map(|(key, description)| (key.to_string(), description.to_string()))
            .collect()
    }
}
