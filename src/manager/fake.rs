use crate::backend::{BackendError, SourceInput, VideoApi, VideoId, VideoRecord};

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};

/// In-memory collection that can be told to fail every request. Clones share
/// the same collection.
#[derive(Clone, Default)]
pub struct FakeApi {
    videos: Arc<Mutex<Vec<VideoRecord>>>,
    next_id: Arc<AtomicUsize>,
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl FakeApi {
    pub fn with_videos(videos: Vec<VideoRecord>) -> Self {
        Self {
            next_id: Arc::new(AtomicUsize::new(videos.len() + 1)),
            videos: Arc::new(Mutex::new(videos)),
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn videos(&self) -> Vec<VideoRecord> {
        self.videos.lock().clone()
    }

    pub fn push(&self, video: VideoRecord) {
        self.videos.lock().push(video);
    }

    fn check(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(BackendError::InvalidUrl {
                address: String::from("http://unreachable"),
                reason: String::from("simulated network error"),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl VideoApi for FakeApi {
    async fn list(&self) -> Result<Vec<VideoRecord>, BackendError> {
        self.check()?;
        Ok(self.videos())
    }

    async fn create(&self, title: &str, source: &SourceInput) -> Result<VideoRecord, BackendError> {
        self.check()?;
        let source = match source {
            SourceInput::Url(url) => url.clone(),
            SourceInput::File(path) => path.display().to_string(),
        };
        let video = VideoRecord {
            id: VideoId::new(self.next_id.fetch_add(1, Ordering::SeqCst).to_string()),
            title: title.to_owned(),
            source: Some(source),
        };
        self.push(video.clone());
        Ok(video)
    }

    async fn update_title(&self, id: &VideoId, title: &str) -> Result<(), BackendError> {
        self.check()?;
        if let Some(video) = self.videos.lock().iter_mut().find(|video| &video.id == id) {
            video.title = title.to_owned();
        }
        Ok(())
    }

    async fn delete(&self, id: &VideoId) -> Result<(), BackendError> {
        self.check()?;
        self.videos.lock().retain(|video| &video.id != id);
        Ok(())
    }
}
