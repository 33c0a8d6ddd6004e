use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;

use sorted_core::error::SortedError;
use sorted_core::models::media::MediaKind;
use sorted_core::models::service::{parse_locator, ServiceKind};

use crate::{ResolvedMetadata, Resolver};

const OEMBED_URL: &str = "https://www.youtube.com/oembed";

pub struct YoutubeResolver {
    client: reqwest::Client,
}

impl YoutubeResolver {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static("sorted/0.1.0"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("failed to build reqwest client");

        Self { client }
    }
}

impl Default for YoutubeResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Pulls the video id out of the URL shapes youtube serves: `watch?v=`,
/// `youtu.be/<id>`, `shorts/<id>` and `embed/<id>`. A scheme is added
/// when the user left it off.
pub fn extract_video_id(locator: &str) -> Option<String> {
    let url = parse_locator(locator)?;
    match url.host_str()? {
        "www.youtube.com" | "youtube.com" | "m.youtube.com" => {
            if url.path() == "/watch" {
                return url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
                    .filter(|id| !id.is_empty());
            }
            let mut segments = url.path_segments()?;
            match segments.next()? {
                "shorts" | "embed" => segments
                    .next()
                    .filter(|id| !id.is_empty())
                    .map(str::to_string),
                _ => None,
            }
        }
        "youtu.be" => url
            .path_segments()?
            .next()
            .filter(|id| !id.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// Rebuilds a watch URL from a video id, the form the resolver API and
/// presentation layers expect.
pub fn build_watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

#[derive(Deserialize)]
struct OembedResponse {
    title: String,
    author_name: Option<String>,
    author_url: Option<String>,
    thumbnail_url: Option<String>,
}

fn metadata_from_oembed(video_id: String, response: OembedResponse) -> ResolvedMetadata {
    let mut fields = serde_json::Map::new();
    fields.insert("title".to_string(), Value::String(response.title));
    if let Some(uploader) = response.author_name {
        fields.insert("uploader".to_string(), Value::String(uploader));
    }
    if let Some(uploader_url) = response.author_url {
        fields.insert("uploader-url".to_string(), Value::String(uploader_url));
    }
    if let Some(thumbnail) = response.thumbnail_url {
        fields.insert("thumbnail".to_string(), Value::String(thumbnail));
    }

    ResolvedMetadata {
        id: video_id,
        fields,
    }
}

#[async_trait]
impl Resolver for YoutubeResolver {
    fn service(&self) -> ServiceKind {
        ServiceKind::Youtube
    }

    fn section(&self) -> MediaKind {
        MediaKind::Videos
    }

    fn build_locator(&self, resolvable_id: &str) -> String {
        build_watch_url(resolvable_id)
    }

    fn extract_id(&self, locator: &str) -> Option<String> {
        extract_video_id(locator)
    }

    async fn resolve(&self, locator: &str) -> Result<ResolvedMetadata, SortedError> {
        let video_id = extract_video_id(locator).ok_or_else(|| SortedError::Resolution {
            locator: locator.to_string(),
            message: "not a recognizable youtube url".into(),
        })?;

        let watch_url = build_watch_url(&video_id);
        let response = self
            .client
            .get(OEMBED_URL)
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .send()
            .await
            .map_err(|e| SortedError::Resolution {
                locator: locator.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SortedError::Resolution {
                locator: locator.to_string(),
                message: format!("oembed returned status {}", response.status()),
            });
        }

        let oembed: OembedResponse =
            response.json().await.map_err(|e| SortedError::Resolution {
                locator: locator.to_string(),
                message: format!("unexpected oembed payload: {e}"),
            })?;

        Ok(metadata_from_oembed(video_id, oembed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=erb4n8PW2qw"),
            Some("erb4n8PW2qw".to_string())
        );
        assert_eq!(
            extract_video_id("youtube.com/watch?v=erb4n8PW2qw&t=120"),
            Some("erb4n8PW2qw".to_string())
        );
    }

    #[test]
    fn test_extract_short_forms() {
        assert_eq!(
            extract_video_id("https://youtu.be/erb4n8PW2qw"),
            Some("erb4n8PW2qw".to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_rejects_foreign_urls() {
        assert_eq!(extract_video_id("https://vimeo.com/12345"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/feed/library"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch"), None);
    }

    #[test]
    fn test_build_watch_url() {
        assert_eq!(
            build_watch_url("erb4n8PW2qw"),
            "https://www.youtube.com/watch?v=erb4n8PW2qw"
        );
    }

    #[test]
    fn test_metadata_from_oembed_shape() {
        let response = OembedResponse {
            title: "A Video".into(),
            author_name: Some("Someone".into()),
            author_url: None,
            thumbnail_url: Some("https://i.ytimg.com/vi/x/hqdefault.jpg".into()),
        };
        let metadata = metadata_from_oembed("erb4n8PW2qw".into(), response);

        assert_eq!(metadata.id, "erb4n8PW2qw");
        assert_eq!(metadata.fields["title"], "A Video");
        assert_eq!(metadata.fields["uploader"], "Someone");
        assert!(!metadata.fields.contains_key("uploader-url"));
        // the id lives outside the fields, never inside
        assert!(!metadata.fields.contains_key("id"));
    }
}
