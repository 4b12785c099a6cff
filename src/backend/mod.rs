pub mod error;
pub mod http;

pub use error::BackendError;

use async_trait::async_trait;
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use std::{collections::BTreeMap, fmt, path::PathBuf};

/// Server-assigned record id. Servers send either strings or numbers, both
/// are kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for VideoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => Self(id),
            RawId::Signed(id) => Self(id.to_string()),
            RawId::Unsigned(id) => Self(id.to_string()),
        })
    }
}

/// A video as the server describes it. `source` is either the linked URL or
/// a label for the uploaded file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct VideoRecord {
    pub id: VideoId,
    pub title: String,
    pub source: Option<String>,
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "_id")]
    document_id: Option<VideoId>,
    id: Option<VideoId>,
    title: String,
    #[serde(default)]
    source: Option<RawSource>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSource {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Reference(BTreeMap<String, RawField>),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Text(String),
    Other(IgnoredAny),
}

/// Keys an upload reference may name its file by, most descriptive first.
const REFERENCE_KEYS: [&str; 6] = ["url", "path", "filename", "name", "_id", "id"];

impl RawSource {
    fn into_label(self) -> Option<String> {
        match self {
            RawSource::Text(text) => Some(text),
            RawSource::Signed(number) => Some(number.to_string()),
            RawSource::Unsigned(number) => Some(number.to_string()),
            RawSource::Reference(mut fields) => REFERENCE_KEYS.iter().find_map(|key| {
                match fields.remove(*key) {
                    Some(RawField::Text(text)) => Some(text),
                    _ => None,
                }
            }),
            RawSource::Other(_) => None,
        }
    }
}

impl TryFrom<RawRecord> for VideoRecord {
    type Error = String;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        // Mongo documents carry `_id`, and `id` as well when virtuals are on.
        let id = raw
            .document_id
            .or(raw.id)
            .ok_or_else(|| format!("video \"{}\" has no id", raw.title))?;

        Ok(Self {
            id,
            title: raw.title,
            source: raw.source.and_then(RawSource::into_label),
        })
    }
}

/// How new videos get their source: a linked URL or an uploaded file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateMode {
    #[default]
    Url,
    File,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceInput {
    Url(String),
    File(PathBuf),
}

#[async_trait]
pub trait VideoApi: Send + Sync {
    async fn list(&self) -> Result<Vec<VideoRecord>, BackendError>;

    async fn create(&self, title: &str, source: &SourceInput)
        -> Result<VideoRecord, BackendError>;

    async fn update_title(&self, id: &VideoId, title: &str) -> Result<(), BackendError>;

    async fn delete(&self, id: &VideoId) -> Result<(), BackendError>;
}
