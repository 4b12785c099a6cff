use super::{
    actions::Actions,
    component::{Component, Frame},
};

use parking_lot::Mutex;
use std::{collections::BTreeMap, sync::Arc};
use tui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
};

pub const LOADING_STRING: &str = "Loading...";

pub enum StatusLabelMessage {
    Show(usize, String),
    Remove(usize),
}

/// Right-aligned list of the requests currently in flight.
#[derive(Clone)]
pub struct StatusLabel {
    status_labels: Arc<Mutex<BTreeMap<usize, String>>>,
    actions: Actions,
}

impl StatusLabel {
    pub fn new(actions: Actions, receiver: flume::Receiver<StatusLabelMessage>) -> Self {
        let status_label = Self {
            status_labels: Default::default(),
            actions,
        };

        status_label.listen_status_label_messages(receiver);
        status_label
    }

    fn listen_status_label_messages(&self, receiver: flume::Receiver<StatusLabelMessage>) {
        let actions = self.actions.clone();
        let status_labels = self.status_labels.clone();
        tokio::spawn(async move {
            while let Ok(message) = receiver.recv_async().await {
                match message {
                    StatusLabelMessage::Show(id, label) => {
                        status_labels.lock().insert(id, label);
                    }
                    StatusLabelMessage::Remove(id) => {
                        status_labels.lock().remove(&id);
                    }
                }
                actions.redraw_async().await;
            }
        });
    }

    fn text(&self) -> Option<String> {
        let status_labels = self.status_labels.lock();
        (!status_labels.is_empty()).then(|| {
            let labels: Vec<&str> = status_labels.values().map(String::as_str).collect();
            labels.join(", ")
        })
    }
}

impl Component for StatusLabel {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        if let Some(text) = self.text() {
            let text_length = u16::try_from(text.chars().count())
                .unwrap_or(u16::MAX)
                .min(area.width);
            let label = Paragraph::new(text).style(Style::default().fg(Color::Yellow));
            let label_area = Rect {
                x: area.x + area.width - text_length,
                y: area.y,
                width: text_length,
                height: 1,
            };
            f.render_widget(label, label_area);
        }
    }
}
