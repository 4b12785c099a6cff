use super::{
    actions::Actions,
    component::{Component, Frame},
    dialog::Dialog,
};

use crossterm::event::{Event, KeyCode, KeyEvent};
use parking_lot::Mutex;
use std::sync::Arc;
use tui::layout::Rect;

pub struct ErrorMessage {
    pub message: String,
    pub ignorable: bool,
}

/// Draws `child` and puts the latest error on top of it. While an error is
/// shown the child gets no input.
pub struct ErrorHandler {
    actions: Actions,
    child: Box<dyn Component>,
    error: Arc<Mutex<Option<ErrorMessage>>>,
}

impl ErrorHandler {
    pub fn new(
        actions: Actions,
        error_receiver: flume::Receiver<ErrorMessage>,
        child: impl Component + 'static,
    ) -> Self {
        let error_handler = Self {
            actions,
            child: Box::new(child),
            error: Arc::new(Mutex::new(None)),
        };

        error_handler.listen_error_messages(error_receiver);
        error_handler
    }

    fn listen_error_messages(&self, error_receiver: flume::Receiver<ErrorMessage>) {
        let actions = self.actions.clone();
        let error = Arc::clone(&self.error);
        tokio::spawn(async move {
            while let Ok(new_error) = error_receiver.recv_async().await {
                {
                    let mut error = error.lock();
                    // A blocking error stays until the program exits.
                    if !matches!(*error, Some(ErrorMessage { ignorable: false, .. })) {
                        *error = Some(new_error);
                    }
                }
                actions.redraw_async().await;
            }
        });
    }
}

impl Component for ErrorHandler {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        self.child.draw(f, area);

        if let Some(ref error) = *self.error.lock() {
            Dialog::new_with_body("Something went wrong", Some(error.message.as_str())).draw(f, area);
        }
    }

    fn handle_event(&mut self, event: Event) {
        let ignorable = self.error.lock().as_ref().map(|error| error.ignorable);
        let Some(ignorable) = ignorable else {
            self.child.handle_event(event);
            return;
        };

        if event == Event::Key(KeyEvent::from(KeyCode::Char('q'))) {
            self.actions.quit();
        } else if ignorable
            && (event == Event::Key(KeyEvent::from(KeyCode::Esc))
                || event == Event::Key(KeyEvent::from(KeyCode::Enter)))
        {
            *self.error.lock() = None;
            self.actions.redraw();
        }
    }

    fn registered_events(&self) -> Vec<(String, String)> {
        let error = self.error.lock();
        match *error {
            Some(ErrorMessage { ignorable: true, .. }) => vec![
                (String::from("Esc"), String::from("Close")),
                (String::from("q"), String::from("Quit")),
            ],
            Some(ErrorMessage { ignorable: false, .. }) => {
                vec![(String::from("q"), String::from("Quit"))]
            }
            None => self.child.registered_events(),
        }
    }
}
