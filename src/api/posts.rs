//! Post API endpoints.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreatedPost, ImageFile, NewPost, PostKind};
use crate::AppState;

/// Multipart part carrying the optional image.
const IMAGE_PART: &str = "image";

/// Text parts and the optional image read from a post submission.
#[derive(Debug, Default)]
struct PostSubmission {
    fields: HashMap<String, String>,
    image: Option<ImageFile>,
}

impl PostSubmission {
    fn take(&mut self, name: &str) -> Result<String, AppError> {
        self.fields
            .remove(name)
            .ok_or_else(|| AppError::Validation(format!("Field '{}' is required", name)))
    }

    /// Build the post, requiring every field its kind defines. Empty values are accepted.
    fn into_post(mut self) -> Result<(NewPost, Option<ImageFile>), AppError> {
        let raw_kind = self.take("type")?;
        let kind = PostKind::parse(&raw_kind)
            .ok_or_else(|| AppError::Validation(format!("Unknown post type '{}'", raw_kind)))?;

        let post = match kind {
            PostKind::Question => NewPost::Question {
                title: self.take("title")?,
                description: self.take("description")?,
                tags: self.take("tags")?,
            },
            PostKind::Article => NewPost::Article {
                title: self.take("title")?,
                summary: self.take("abstract")?,
                content: self.take("content")?,
                tags: self.take("tags")?,
            },
        };

        Ok((post, self.image))
    }
}

async fn read_submission(mut multipart: Multipart) -> Result<PostSubmission, AppError> {
    let mut submission = PostSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_PART {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid image part: {}", e)))?;

            // Browsers send an empty, unnamed file part when nothing was picked
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            if file_name.is_empty() {
                return Err(AppError::Validation(
                    "Image part needs a file name".to_string(),
                ));
            }

            submission.image = Some(ImageFile {
                name: file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid field '{}': {}", name, e)))?;
            submission.fields.insert(name, value);
        }
    }

    Ok(submission)
}

/// POST /api/posts - Create a question or article, with an optional image.
pub async fn create_post(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<CreatedPost> {
    let (post, image) = read_submission(multipart).await?.into_post()?;

    match state.service.create_post(post, image).await {
        Ok(id) => success(CreatedPost { id }),
        Err(e) => {
            tracing::error!("Saving post failed: {}", e);
            Err(e)
        }
    }
}

/// DELETE /api/posts/{id} - Delete a post.
pub async fn delete_post(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.service.delete_post(&id).await?;
    success(())
}
