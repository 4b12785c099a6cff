use super::{
    actions::Actions,
    component::{Component, Frame},
    status_label::LOADING_STRING,
    video_view::VideoView,
};
use crate::{
    backend::http::HttpVideoApi,
    config::{args::CommandLine, ConfigHandler},
    error::StartupError,
    logging,
    manager::VideoListManager,
};

use crossterm::event::{Event, KeyCode, KeyEvent};
use parking_lot::Mutex;
use std::sync::Arc;
use tui::layout::Rect;

/// Loads the config and builds the HTTP backend, then hands over to the
/// video view.
pub struct BackendProvider {
    actions: Actions,
    video_view: Arc<Mutex<Option<VideoView<HttpVideoApi>>>>,
}

impl BackendProvider {
    pub fn new(actions: Actions, command_line: CommandLine) -> Self {
        let backend_provider = Self {
            actions: actions.clone(),
            video_view: Arc::new(Mutex::new(None)),
        };

        backend_provider.init(actions, command_line);
        backend_provider
    }

    fn init(&self, actions: Actions, command_line: CommandLine) {
        let video_view = self.video_view.clone();

        tokio::spawn(async move {
            let finished_loading = actions.show_label(LOADING_STRING);
            let init_result = Self::init_impl(actions.clone(), &command_line, video_view).await;
            finished_loading();
            actions.redraw_or_error_async(init_result, false).await;
        });
    }

    async fn init_impl(
        actions: Actions,
        command_line: &CommandLine,
        video_view: Arc<Mutex<Option<VideoView<HttpVideoApi>>>>,
    ) -> Result<(), StartupError> {
        let config_handler = ConfigHandler::load(command_line).await?;
        let config = config_handler.config();

        match logging::init(&config.log_level) {
            Ok(path) => log::info!(
                "Logging to {}, config from {}",
                path.display(),
                config_handler.path().display()
            ),
            Err(error) => actions.handle_error_async(error, true).await,
        }

        let api = HttpVideoApi::new(config)?;
        log::info!("Using {} ({:?} mode)", config.base_url, config.create_mode);
        let manager = VideoListManager::new(api, config.create_mode);

        let mut video_view = video_view.lock();
        *video_view = Some(VideoView::new(actions, manager));
        Ok(())
    }
}

impl Component for BackendProvider {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        if let Some(ref mut video_view) = *self.video_view.lock() {
            video_view.draw(f, area);
        }
    }

    fn handle_event(&mut self, event: Event) {
        match *self.video_view.lock() {
            Some(ref mut video_view) => video_view.handle_event(event),
            None if event == Event::Key(KeyEvent::from(KeyCode::Char('q'))) => {
                self.actions.quit()
            }
            None => (),
        }
    }

    fn registered_events(&self) -> Vec<(String, String)> {
        match *self.video_view.lock() {
            Some(ref video_view) => video_view.registered_events(),
            None => vec![(String::from("q"), String::from("Quit"))],
        }
    }
}
