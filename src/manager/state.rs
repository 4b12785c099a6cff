use super::form::CreateForm;
use crate::backend::{VideoId, VideoRecord};

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

/// Everything that can happen to the local list. Outcomes are only applied
/// after the server answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoAction {
    LoadStarted,
    ListLoaded {
        generation: u64,
        videos: Vec<VideoRecord>,
    },
    LoadFailed {
        generation: u64,
        message: String,
    },

    CreateStarted,
    CreateSucceeded(VideoRecord),
    CreateFailed(String),

    DeleteStarted(VideoId),
    DeleteSucceeded(VideoId),
    DeleteFailed {
        id: VideoId,
        message: String,
    },

    UpdateStarted(VideoId),
    UpdateSucceeded {
        id: VideoId,
        title: String,
    },
    UpdateFailed {
        id: VideoId,
        message: String,
    },
}

#[derive(Clone, Debug, Default)]
pub struct VideoListState {
    videos: Vec<VideoRecord>,
    form: CreateForm,
    status: LoadStatus,
    load_generation: u64,
    in_flight: usize,
}

impl VideoListState {
    pub fn apply(&mut self, action: VideoAction) {
        match action {
            VideoAction::LoadStarted => {
                self.load_generation += 1;
                self.status = LoadStatus::Loading;
                self.in_flight += 1;
            }
            VideoAction::ListLoaded { generation, videos } => {
                self.finish_request();
                if generation != self.load_generation {
                    log::debug!(
                        "Dropping list from load {generation}, latest is {}",
                        self.load_generation
                    );
                    return;
                }
                self.videos = dedupe(videos);
                self.status = LoadStatus::Loaded;
            }
            VideoAction::LoadFailed { generation, .. } => {
                self.finish_request();
                if generation == self.load_generation {
                    self.status = LoadStatus::Failed;
                }
            }

            VideoAction::CreateStarted
            | VideoAction::DeleteStarted(_)
            | VideoAction::UpdateStarted(_) => self.in_flight += 1,

            VideoAction::CreateSucceeded(video) => {
                self.finish_request();
                match self.videos.iter_mut().find(|existing| existing.id == video.id) {
                    Some(existing) => *existing = video,
                    None => self.videos.push(video),
                }
                self.form.clear();
            }
            VideoAction::DeleteSucceeded(id) => {
                self.finish_request();
                self.videos.retain(|video| video.id != id);
            }
            VideoAction::UpdateSucceeded { id, title } => {
                self.finish_request();
                if let Some(video) = self.videos.iter_mut().find(|video| video.id == id) {
                    video.title = title;
                }
            }

            VideoAction::CreateFailed(_)
            | VideoAction::DeleteFailed { .. }
            | VideoAction::UpdateFailed { .. } => self.finish_request(),
        }
    }

    fn finish_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CreateForm {
        &mut self.form
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn load_generation(&self) -> u64 {
        self.load_generation
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

fn dedupe(videos: Vec<VideoRecord>) -> Vec<VideoRecord> {
    let mut seen = HashSet::new();
    videos
        .into_iter()
        .filter(|video| {
            let first = seen.insert(video.id.clone());
            if !first {
                log::warn!("Server listed video {} more than once", video.id);
            }
            first
        })
        .collect()
}
