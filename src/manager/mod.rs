#[cfg(test)]
pub mod fake;
pub mod form;
pub mod state;

use crate::backend::{BackendError, CreateMode, SourceInput, VideoApi, VideoId};
use form::{validate_create, ValidationError};
use state::{VideoAction, VideoListState};

use err_derive::Error;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(display = "{}", _0)]
    Validation(#[error(from)] ValidationError),

    #[error(display = "{}", _0)]
    Backend(#[error(from)] BackendError),
}

/// Answer to an input request such as the edit prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TitleInput {
    Submitted(String),
    Cancelled,
}

/// Keeps the local list in step with the remote collection. Each operation
/// issues at most one request and only commits its outcome once the server
/// has answered.
pub struct VideoListManager<A> {
    api: Arc<A>,
    state: Arc<Mutex<VideoListState>>,
    mode: CreateMode,
}

impl<A> Clone for VideoListManager<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
            mode: self.mode,
        }
    }
}

impl<A: VideoApi> VideoListManager<A> {
    pub fn new(api: A, mode: CreateMode) -> Self {
        Self {
            api: Arc::new(api),
            state: Default::default(),
            mode,
        }
    }

    pub fn mode(&self) -> CreateMode {
        self.mode
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&VideoListState) -> R) -> R {
        f(&self.state.lock())
    }

    pub fn update_form<R>(&self, f: impl FnOnce(&mut form::CreateForm) -> R) -> R {
        f(self.state.lock().form_mut())
    }

    fn apply(&self, action: VideoAction) {
        self.state.lock().apply(action);
    }

    pub async fn load_all(&self) -> Result<(), ManagerError> {
        let generation = {
            let mut state = self.state.lock();
            state.apply(VideoAction::LoadStarted);
            state.load_generation()
        };

        match self.api.list().await {
            Ok(videos) => {
                log::info!("Loaded {} videos", videos.len());
                self.apply(VideoAction::ListLoaded { generation, videos });
                Ok(())
            }
            Err(error) => {
                log::error!("Error fetching videos: {error}");
                self.apply(VideoAction::LoadFailed {
                    generation,
                    message: error.to_string(),
                });
                Err(error.into())
            }
        }
    }

    /// Creates a video from the pending form fields.
    pub async fn submit_form(&self) -> Result<(), ManagerError> {
        let (title, source) = self.with_state(|state| state.form().validate(self.mode))?;
        self.create_video(&title, source).await
    }

    pub async fn create_video(&self, title: &str, source: SourceInput) -> Result<(), ManagerError> {
        let title = validate_create(title, &source)?;

        self.apply(VideoAction::CreateStarted);
        match self.api.create(&title, &source).await {
            Ok(video) => {
                log::info!("Created video {} ({})", video.id, video.title);
                self.apply(VideoAction::CreateSucceeded(video));
                Ok(())
            }
            Err(error) => {
                log::error!("Error adding video {title}: {error}");
                self.apply(VideoAction::CreateFailed(error.to_string()));
                Err(error.into())
            }
        }
    }

    pub async fn delete_video(&self, id: &VideoId) -> Result<(), ManagerError> {
        self.apply(VideoAction::DeleteStarted(id.clone()));
        match self.api.delete(id).await {
            Ok(()) => {
                log::info!("Deleted video {id}");
                self.apply(VideoAction::DeleteSucceeded(id.clone()));
                Ok(())
            }
            Err(error) => {
                log::error!("Error deleting video {id}: {error}");
                self.apply(VideoAction::DeleteFailed {
                    id: id.clone(),
                    message: error.to_string(),
                });
                Err(error.into())
            }
        }
    }

    /// Renames a video. Empty or cancelled input does nothing.
    pub async fn edit_video(&self, id: &VideoId, input: TitleInput) -> Result<(), ManagerError> {
        let title = match input {
            TitleInput::Submitted(title) if !title.trim().is_empty() => title.trim().to_owned(),
            _ => return Ok(()),
        };

        self.apply(VideoAction::UpdateStarted(id.clone()));
        match self.api.update_title(id, &title).await {
            Ok(()) => {
                log::info!("Renamed video {id} to {title}");
                self.apply(VideoAction::UpdateSucceeded {
                    id: id.clone(),
                    title,
                });
                Ok(())
            }
            Err(error) => {
                log::error!("Error updating video {id}: {error}");
                self.apply(VideoAction::UpdateFailed {
                    id: id.clone(),
                    message: error.to_string(),
                });
                Err(error.into())
            }
        }
    }
}
