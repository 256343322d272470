//! `PostService` backed by a remote postboard server.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::PostService;
use crate::errors::{AppError, ErrorResponse};
use crate::models::{CreatedPost, ImageFile, NewPost, PostId, Question};

#[derive(Deserialize)]
struct SuccessEnvelope<T> {
    data: T,
}

/// HTTP client for the `/api` routes.
#[derive(Clone)]
pub struct HttpPostService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPostService {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/api/posts/{id}` with the id percent-encoded as a single segment.
    fn post_url(&self, id: &str) -> Result<Url, AppError> {
        let invalid = |e: String| AppError::Delete(format!("Invalid post URL for {}: {}", id, e));
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(["api", "posts", id]);
        Ok(url)
    }
}

fn post_form(post: NewPost, image: Option<ImageFile>) -> Result<Form, AppError> {
    let mut form = Form::new().text("type", post.kind().as_str());
    form = match post {
        NewPost::Question {
            title,
            description,
            tags,
        } => form
            .text("title", title)
            .text("description", description)
            .text("tags", tags),
        NewPost::Article {
            title,
            summary,
            content,
            tags,
        } => form
            .text("title", title)
            .text("abstract", summary)
            .text("content", content)
            .text("tags", tags),
    };

    if let Some(image) = image {
        let mut part = Part::bytes(image.bytes).file_name(image.name);
        if let Some(content_type) = image.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }
        form = form.part("image", part);
    }

    Ok(form)
}

/// Decode a response envelope, turning error envelopes back into `AppError`s.
///
/// A body that is not an envelope at all is reported through `failed`, so the error
/// stays on the path of the operation that made the request.
async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    failed: fn(String) -> AppError,
) -> Result<T, AppError> {
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .map_err(|e| failed(format!("Unreadable response ({}): {}", status, e)))?;

    if status.is_success() {
        let envelope: SuccessEnvelope<T> = serde_json::from_value(body)
            .map_err(|e| failed(format!("Unexpected response body: {}", e)))?;
        Ok(envelope.data)
    } else {
        let envelope: ErrorResponse = serde_json::from_value(body)
            .map_err(|e| failed(format!("Unexpected error body ({}): {}", status, e)))?;
        Err(AppError::from_code(
            &envelope.error.code,
            envelope.error.message,
        ))
    }
}

#[async_trait]
impl PostService for HttpPostService {
    async fn create_post(
        &self,
        post: NewPost,
        image: Option<ImageFile>,
    ) -> Result<PostId, AppError> {
        let form = post_form(post, image)?;
        let response = self
            .client
            .post(self.url("/api/posts"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Insert(format!("Sending post failed: {}", e)))?;

        let created: CreatedPost = read_envelope(response, AppError::Insert).await?;
        Ok(created.id)
    }

    async fn list_questions(&self) -> Result<Vec<Question>, AppError> {
        let response = self
            .client
            .get(self.url("/api/questions"))
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Loading questions failed: {}", e)))?;

        read_envelope(response, AppError::Fetch).await
    }

    async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        let response = self
            .client
            .delete(self.post_url(id)?)
            .send()
            .await
            .map_err(|e| AppError::Delete(format!("Deleting post {} failed: {}", id, e)))?;

        read_envelope::<Value>(response, AppError::Delete)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let service = HttpPostService::new("http://localhost:8080/");
        assert_eq!(
            service.url("/api/questions"),
            "http://localhost:8080/api/questions"
        );
    }

    #[test]
    fn test_post_url_encodes_id() {
        let service = HttpPostService::new("http://localhost:8080/board/");
        let url = service.post_url("a/b?c#d").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/board/api/posts/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_form_rejects_bad_mime() {
        let image = ImageFile::new("a.png", vec![1]).with_content_type("not a mime");
        let post = NewPost::Question {
            title: String::new(),
            description: String::new(),
            tags: String::new(),
        };
        assert!(post_form(post, Some(image)).is_err());
    }
}
