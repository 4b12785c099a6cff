use super::{BackendError, SourceInput, VideoApi, VideoId, VideoRecord};
use crate::config::{Config, Endpoints};

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Url,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use tokio::fs;

#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope {
    Bare(Vec<VideoRecord>),
    Data { data: Vec<VideoRecord> },
}

impl From<ListEnvelope> for Vec<VideoRecord> {
    fn from(value: ListEnvelope) -> Self {
        match value {
            ListEnvelope::Bare(videos) | ListEnvelope::Data { data: videos } => videos,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordEnvelope {
    Video { video: VideoRecord },
    Data { data: VideoRecord },
    Bare(VideoRecord),
}

impl From<RecordEnvelope> for VideoRecord {
    fn from(value: RecordEnvelope) -> Self {
        match value {
            RecordEnvelope::Video { video }
            | RecordEnvelope::Data { data: video }
            | RecordEnvelope::Bare(video) => video,
        }
    }
}

#[derive(Serialize)]
struct CreateBody<'a> {
    title: &'a str,
    source: &'a str,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    title: &'a str,
}

pub struct HttpVideoApi {
    client: Client,
    base_url: Url,
    endpoints: Endpoints,
    upload_field: String,
}

impl HttpVideoApi {
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let base_url = Url::parse(&config.base_url).map_err(|error| BackendError::InvalidUrl {
            address: config.base_url.clone(),
            reason: error.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl {
                address: config.base_url.clone(),
                reason: String::from("not a base URL"),
            });
        }

        let mut client = Client::builder();
        if let Some(timeout) = request_timeout(config.request_timeout_secs) {
            client = client.timeout(timeout);
        }
        let client = client.build()?;

        Ok(Self {
            client,
            base_url,
            endpoints: config.endpoints.clone(),
            upload_field: config.upload_field.clone(),
        })
    }

    fn url(&self, template: &str, params: &[(&str, &str)]) -> Result<Url, BackendError> {
        resolve_endpoint(&self.base_url, template, params)
    }

    async fn upload_part(path: &Path) -> Result<Part, BackendError> {
        let bytes = fs::read(path)
            .await
            .map_err(|error| BackendError::ReadUploadFile {
                path: path.display().to_string(),
                error,
            })?;

        let part = Part::bytes(bytes);
        Ok(match path.file_name() {
            Some(name) => part.file_name(name.to_string_lossy().into_owned()),
            None => part,
        })
    }
}

#[async_trait]
impl VideoApi for HttpVideoApi {
    async fn list(&self) -> Result<Vec<VideoRecord>, BackendError> {
        let url = self.url(&self.endpoints.list, &[])?;
        log::debug!("GET {url}");

        let envelope: ListEnvelope = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(envelope.into())
    }

    async fn create(
        &self,
        title: &str,
        source: &SourceInput,
    ) -> Result<VideoRecord, BackendError> {
        let request = match source {
            SourceInput::Url(source) => {
                let url = self.url(&self.endpoints.create, &[])?;
                log::debug!("POST {url}");
                self.client.post(url).json(&CreateBody { title, source })
            }
            SourceInput::File(path) => {
                let url = self.url(&self.endpoints.upload, &[("title", title)])?;
                log::debug!("POST {url} (upload {})", path.display());
                let part = Self::upload_part(path).await?;
                let form = Form::new().part(self.upload_field.clone(), part);
                self.client.post(url).multipart(form)
            }
        };

        let envelope: RecordEnvelope = request.send().await?.error_for_status()?.json().await?;
        Ok(envelope.into())
    }

    async fn update_title(&self, id: &VideoId, title: &str) -> Result<(), BackendError> {
        let url = self.url(&self.endpoints.update, &[("id", id.as_str())])?;
        log::debug!("PUT {url}");

        // The updated record is not needed, the requested title is committed on success.
        self.client
            .put(url)
            .json(&UpdateBody { title })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    async fn delete(&self, id: &VideoId) -> Result<(), BackendError> {
        let url = self.url(&self.endpoints.delete, &[("id", id.as_str())])?;
        log::debug!("DELETE {url}");

        self.client.delete(url).send().await?.error_for_status()?;
        Ok(())
    }
}

/// Zero disables the timeout.
fn request_timeout(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Appends `template` to the path of `base`. Every `{name}` segment is
/// replaced by its value from `params`, and every param must be used.
pub fn resolve_endpoint(
    base: &Url,
    template: &str,
    params: &[(&str, &str)],
) -> Result<Url, BackendError> {
    let mut url = base.clone();
    let mut used = vec![false; params.len()];

    {
        let mut segments = url.path_segments_mut().map_err(|_| BackendError::InvalidUrl {
            address: base.to_string(),
            reason: String::from("not a base URL"),
        })?;
        segments.pop_if_empty();

        for segment in template.split('/').filter(|segment| !segment.is_empty()) {
            let placeholder = segment
                .strip_prefix('{')
                .and_then(|segment| segment.strip_suffix('}'));

            match placeholder {
                Some(name) => {
                    let index = params
                        .iter()
                        .position(|(param, _)| *param == name)
                        .ok_or_else(|| BackendError::UnknownPlaceholder {
                            template: template.to_owned(),
                            placeholder: segment.to_owned(),
                        })?;
                    let value = params[index].1;
                    // Empty and dot segments would be dropped or resolved away.
                    if matches!(value, "" | "." | "..") {
                        return Err(BackendError::UnaddressableSegment {
                            placeholder: segment.to_owned(),
                            value: value.to_owned(),
                        });
                    }
                    used[index] = true;
                    segments.push(value);
                }
                None => {
                    segments.push(segment);
                }
            }
        }
    }

    if let Some(index) = used.iter().position(|used| !used) {
        return Err(BackendError::MissingPlaceholder {
            template: template.to_owned(),
            placeholder: format!("{{{}}}", params[index].0),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    fn base(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn endpoint_joins_base_path() {
        let url = resolve_endpoint(
            &base("https://tg-video-server.vercel.app/api/video"),
            "videoTitle",
            &[],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://tg-video-server.vercel.app/api/video/videoTitle"
        );

        let url = resolve_endpoint(&base("http://localhost:3000/"), "/videos", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/videos");
    }

    #[test]
    fn endpoint_params_are_single_encoded_segments() {
        let url = resolve_endpoint(
            &base("http://localhost:3000/api/"),
            "/videos/{title}",
            &[("title", "My clip/1")],
        )
        .unwrap();

        assert_eq!(url.as_str(), "http://localhost:3000/api/videos/My%20clip%2F1");
    }

    #[test]
    fn dot_and_empty_values_are_rejected() {
        for value in ["..", ".", ""] {
            let result = resolve_endpoint(
                &base("http://localhost:3000"),
                "/videos/{title}",
                &[("title", value)],
            );
            assert!(matches!(
                result,
                Err(BackendError::UnaddressableSegment { value: rejected, .. }) if rejected == value
            ));
        }

        let url = resolve_endpoint(
            &base("http://localhost:3000"),
            "/videos/{title}",
            &[("title", "...")],
        )
        .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/videos/...");
    }

    #[test]
    fn endpoint_without_id_placeholder_is_rejected() {
        let result = resolve_endpoint(&base("http://localhost"), "/videos", &[("id", "7")]);
        assert!(matches!(
            result,
            Err(BackendError::MissingPlaceholder { placeholder, .. }) if placeholder == "{id}"
        ));
    }

    #[test]
    fn endpoint_with_unknown_placeholder_is_rejected() {
        let result = resolve_endpoint(&base("http://localhost"), "/videos/{slug}", &[]);
        assert!(matches!(
            result,
            Err(BackendError::UnknownPlaceholder { placeholder, .. }) if placeholder == "{slug}"
        ));
    }

    #[test]
    fn list_survives_upload_references_and_virtual_ids() {
        let envelope: ListEnvelope = serde_json::from_str(
            r#"{"data": [
                {"_id": "a1", "title": "A", "source": {"url": "x"}},
                {"_id": "b2", "id": "b2", "title": "B", "source": "http://x/b.mp4"}
            ]}"#,
        )
        .unwrap();

        let videos: Vec<VideoRecord> = envelope.into();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].source.as_deref(), Some("x"));
        assert_eq!(videos[1].id, VideoId::new("b2"));
    }

    #[test]
    fn list_accepts_bare_and_wrapped_arrays() {
        let bare: ListEnvelope = serde_json::from_str(r#"[{"id": 1, "title": "A"}]"#).unwrap();
        let wrapped: ListEnvelope =
            serde_json::from_str(r#"{"data": [{"_id": "a1", "title": "A"}, {"_id": "b2", "title": "B"}]}"#)
                .unwrap();

        let bare: Vec<VideoRecord> = bare.into();
        let wrapped: Vec<VideoRecord> = wrapped.into();
        assert_eq!(bare.len(), 1);
        assert_eq!(wrapped.len(), 2);
        assert_eq!(wrapped[1].id, VideoId::new("b2"));
    }

    #[test]
    fn create_accepts_every_record_envelope() {
        for body in [
            r#"{"video": {"id": 2, "title": "B", "source": "http://x/video.mp4"}}"#,
            r#"{"data": {"id": 2, "title": "B", "source": "http://x/video.mp4"}}"#,
            r#"{"id": 2, "title": "B", "source": "http://x/video.mp4"}"#,
        ] {
            let envelope: RecordEnvelope = serde_json::from_str(body).unwrap();
            let record: VideoRecord = envelope.into();
            assert_eq!(record.id, VideoId::new("2"));
            assert_eq!(record.title, "B");
        }
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = Config {
            base_url: String::from("not a url"),
            ..Default::default()
        };
        assert!(matches!(
            HttpVideoApi::new(&config),
            Err(BackendError::InvalidUrl { .. })
        ));
    }

    /// Serves one canned response and hands back the raw request it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 4096];

            loop {
                let read = socket.read(&mut buffer).await.unwrap();
                request.extend_from_slice(&buffer[..read]);
                if read == 0 || request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&request).into_owned()
        });

        (address, handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    #[test]
    fn zero_timeout_means_none() {
        assert_eq!(request_timeout(0), None);
        assert_eq!(request_timeout(30), Some(Duration::from_secs(30)));
    }

    fn api(address: String) -> HttpVideoApi {
        HttpVideoApi::new(&Config {
            base_url: address,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn list_fetches_collection() {
        let (address, server) =
            serve_once("200 OK", r#"{"data": [{"id": 1, "title": "A"}]}"#).await;

        let videos = api(address).list().await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("GET /videos HTTP/1.1"));
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title, "A");
    }

    #[tokio::test]
    async fn zero_timeout_still_completes_requests() {
        let (address, server) = serve_once("200 OK", r#"[{"id": 1, "title": "A"}]"#).await;
        let api = HttpVideoApi::new(&Config {
            base_url: address,
            request_timeout_secs: 0,
            ..Default::default()
        })
        .unwrap();

        let videos = api.list().await.unwrap();
        server.await.unwrap();

        assert_eq!(videos.len(), 1);
    }

    #[tokio::test]
    async fn create_posts_title_and_source() {
        let (address, server) = serve_once(
            "201 Created",
            r#"{"video": {"id": 2, "title": "B", "source": "http://x/video.mp4"}}"#,
        )
        .await;

        let record = api(address)
            .create("B", &SourceInput::Url(String::from("http://x/video.mp4")))
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /videos HTTP/1.1"));
        assert!(request.contains(r#""title":"B""#));
        assert!(request.contains(r#""source":"http://x/video.mp4""#));
        assert_eq!(record.id, VideoId::new("2"));
    }

    #[tokio::test]
    async fn upload_posts_multipart_to_title_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        fs::write(&path, b"not really a video").await.unwrap();

        let (address, server) =
            serve_once("200 OK", r#"{"data": {"_id": "c3", "title": "Clip"}}"#).await;

        let record = api(address)
            .create("Clip", &SourceInput::File(path.clone()))
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /videos/Clip HTTP/1.1"));
        assert!(request.contains("multipart/form-data"));
        assert!(request.contains(r#"name="video""#));
        assert!(request.contains(r#"filename="clip.mp4""#));
        assert!(request.contains("not really a video"));
        assert_eq!(record.id, VideoId::new("c3"));
    }

    #[tokio::test]
    async fn missing_upload_file_fails_before_request() {
        let api = api(String::from("http://127.0.0.1:9"));
        let result = api
            .create("Clip", &SourceInput::File(PathBuf::from("/nonexistent/vidman.mp4")))
            .await;

        assert!(matches!(result, Err(BackendError::ReadUploadFile { .. })));
    }

    #[tokio::test]
    async fn update_puts_new_title() {
        let (address, server) = serve_once("200 OK", r#"{"id": 1, "title": "New"}"#).await;

        api(address)
            .update_title(&VideoId::new("1"), "New")
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("PUT /videos/1 HTTP/1.1"));
        assert!(request.contains(r#"{"title":"New"}"#));
    }

    #[tokio::test]
    async fn server_error_status_is_a_failure() {
        let (address, server) = serve_once("500 Internal Server Error", "{}").await;

        let result = api(address).delete(&VideoId::new("1")).await;
        let request = server.await.unwrap();

        assert!(request.starts_with("DELETE /videos/1 HTTP/1.1"));
        assert!(matches!(result, Err(BackendError::Request(_))));
    }
}
