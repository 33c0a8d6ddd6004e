use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;

use sorted_core::error::SortedError;
use sorted_core::models::media::MediaKind;
use sorted_core::models::service::{parse_locator, ServiceKind};

use crate::{ResolvedMetadata, Resolver};

pub struct RedditResolver {
    client: reqwest::Client,
}

impl RedditResolver {
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

impl Default for RedditResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes a post URL to its `.json` endpoint, which serves the post
/// data directly: trailing slash stripped, `.json` appended once.
pub fn jsonify_post_url(url: &str) -> String {
    let url = url.trim_end_matches('/');
    if url.ends_with(".json") {
        url.to_string()
    } else {
        format!("{url}.json")
    }
}

/// The post id out of a `/comments/<id>/…` path.
pub fn extract_post_id(locator: &str) -> Option<String> {
    let url = parse_locator(locator)?;
    let mut segments = url.path_segments()?;
    while let Some(segment) = segments.next() {
        if segment == "comments" {
            return segments
                .next()
                .filter(|id| !id.is_empty())
                .map(str::to_string);
        }
    }
    None
}

/// Unwraps the post object out of the listing envelope the API returns:
/// `[0].data.children[0].data`.
fn post_from_listing(listing: &Value) -> Option<&Value> {
    listing
        .get(0)?
        .get("data")?
        .get("children")?
        .get(0)?
        .get("data")
}

fn flair(data: &Value, text_key: &str, color_key: &str) -> Value {
    let mut flair = serde_json::Map::new();
    flair.insert("text".to_string(), data.get(text_key).cloned().unwrap_or(Value::Null));
    flair.insert(
        "background-color".to_string(),
        data.get(color_key).cloned().unwrap_or(Value::Null),
    );
    Value::Object(flair)
}

fn metadata_from_post(data: &Value) -> Result<ResolvedMetadata, String> {
    let id = data
        .get("id")
        .and_then(Value::as_str)
        .ok_or("post data has no id")?
        .to_string();

    let mut fields = serde_json::Map::new();
    for key in [
        "subreddit",
        "author",
        "title",
        "selftext",
        "archived",
        "score",
        "thumbnail",
    ] {
        fields.insert(key.to_string(), data.get(key).cloned().unwrap_or(Value::Null));
    }
    fields.insert(
        "post-flair".to_string(),
        flair(data, "link_flair_text", "link_flair_background_color"),
    );
    fields.insert(
        "author-flair".to_string(),
        flair(data, "author_flair_text", "author_flair_background_color"),
    );
    fields.insert(
        "created-utc".to_string(),
        data.get("created_utc").cloned().unwrap_or(Value::Null),
    );

    Ok(ResolvedMetadata { id, fields })
}

#[async_trait]
impl Resolver for RedditResolver {
    fn service(&self) -> ServiceKind {
        ServiceKind::Reddit
    }

    fn section(&self) -> MediaKind {
        MediaKind::Posts
    }

    fn build_locator(&self, resolvable_id: &str) -> String {
        format!("https://www.reddit.com/comments/{resolvable_id}")
    }

    fn extract_id(&self, locator: &str) -> Option<String> {
        extract_post_id(locator)
    }

    async fn resolve(&self, locator: &str) -> Result<ResolvedMetadata, SortedError> {
        let api_url = jsonify_post_url(locator);
        let response = self
            .client
            .get(&api_url)
            .send()
            .await
            .map_err(|e| SortedError::Resolution {
                locator: locator.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SortedError::Resolution {
                locator: locator.to_string(),
                message: format!("reddit returned status {}", response.status()),
            });
        }

        let listing: Value = response.json().await.map_err(|e| SortedError::Resolution {
            locator: locator.to_string(),
            message: format!("unexpected reddit payload: {e}"),
        })?;

        // too-many-requests and similar errors come back as a non-listing
        // object instead of the expected array
        let post = post_from_listing(&listing).ok_or_else(|| SortedError::Resolution {
            locator: locator.to_string(),
            message: "response is not a post listing".into(),
        })?;

        metadata_from_post(post).map_err(|message| SortedError::Resolution {
            locator: locator.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_jsonify_post_url() {
        assert_eq!(
            jsonify_post_url("https://www.reddit.com/r/rust/comments/abc/title/"),
            "https://www.reddit.com/r/rust/comments/abc/title.json"
        );
        assert_eq!(
            jsonify_post_url("https://www.reddit.com/r/rust/comments/abc/title.json"),
            "https://www.reddit.com/r/rust/comments/abc/title.json"
        );
    }

    #[test]
    fn test_extract_post_id() {
        assert_eq!(
            extract_post_id("https://www.reddit.com/r/unixporn/comments/1p0z2ki/some_title/"),
            Some("1p0z2ki".to_string())
        );
        assert_eq!(
            extract_post_id("https://www.reddit.com/r/rust/"),
            None
        );
    }

    #[test]
    fn test_metadata_from_listing() {
        let listing = json!([
            {
                "data": {
                    "children": [
                        {
                            "data": {
                                "id": "1p0kcrr",
                                "subreddit": "Clamworks",
                                "author": "someone",
                                "title": "clamtube",
                                "selftext": "",
                                "archived": false,
                                "score": 42,
                                "thumbnail": "self",
                                "link_flair_text": "humor",
                                "link_flair_background_color": "#ff0000",
                                "author_flair_text": null,
                                "author_flair_background_color": null,
                                "created_utc": 1760000000.0
                            }
                        }
                    ]
                }
            }
        ]);

        let post = post_from_listing(&listing).unwrap();
        let metadata = metadata_from_post(post).unwrap();

        assert_eq!(metadata.id, "1p0kcrr");
        assert_eq!(metadata.fields["subreddit"], "Clamworks");
        assert_eq!(metadata.fields["score"], 42);
        assert_eq!(metadata.fields["post-flair"]["text"], "humor");
        assert_eq!(metadata.fields["author-flair"]["text"], Value::Null);
        assert_eq!(metadata.fields["created-utc"], 1760000000.0);
        assert!(!metadata.fields.contains_key("id"));
    }

    #[test]
    fn test_non_listing_response_is_rejected() {
        let error_response = json!({"message": "Too Many Requests", "error": 429});
        assert!(post_from_listing(&error_response).is_none());
    }
}
