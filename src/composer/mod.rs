//! Post composer.
//!
//! One form per post kind; switching kinds starts the other form from scratch. Submission
//! goes through `PostService` and never validates field contents.

use crate::errors::AppError;
use crate::models::{ImageFile, NewPost, PostId, PostKind};
use crate::service::PostService;

/// Acknowledgement shown after a post was written.
pub const SUCCESS_NOTICE: &str = "Post saved successfully!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionForm {
    pub title: String,
    pub description: String,
    pub tags: String,
    pub image: Option<ImageFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleForm {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub tags: String,
    pub image: Option<ImageFile>,
}

/// The form currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostForm {
    Question(QuestionForm),
    Article(ArticleForm),
}

impl PostForm {
    pub fn empty(kind: PostKind) -> Self {
        match kind {
            PostKind::Question => PostForm::Question(QuestionForm::default()),
            PostKind::Article => PostForm::Article(ArticleForm::default()),
        }
    }

    pub fn kind(&self) -> PostKind {
        match self {
            PostForm::Question(_) => PostKind::Question,
            PostForm::Article(_) => PostKind::Article,
        }
    }

    fn image_slot(&mut self) -> &mut Option<ImageFile> {
        match self {
            PostForm::Question(form) => &mut form.image,
            PostForm::Article(form) => &mut form.image,
        }
    }

    fn submission(&self) -> (NewPost, Option<ImageFile>) {
        match self {
            PostForm::Question(form) => (
                NewPost::Question {
                    title: form.title.clone(),
                    description: form.description.clone(),
                    tags: form.tags.clone(),
                },
                form.image.clone(),
            ),
            PostForm::Article(form) => (
                NewPost::Article {
                    title: form.title.clone(),
                    summary: form.summary.clone(),
                    content: form.content.clone(),
                    tags: form.tags.clone(),
                },
                form.image.clone(),
            ),
        }
    }
}

/// Result of pressing "Post".
#[derive(Debug)]
pub enum SubmitOutcome {
    Saved { id: PostId, notice: &'static str },
    /// Already logged; the user sees no notice.
    Failed(AppError),
}

impl SubmitOutcome {
    /// The acknowledgement to show, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            SubmitOutcome::Saved { notice, .. } => Some(*notice),
            SubmitOutcome::Failed(_) => None,
        }
    }
}

/// State behind the "new post" screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composer {
    form: PostForm,
}

impl Default for Composer {
    fn default() -> Self {
        Self {
            form: PostForm::empty(PostKind::Question),
        }
    }
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> PostKind {
        self.form.kind()
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    /// Switch post kind. Picking a different kind discards the current form.
    pub fn select_kind(&mut self, kind: PostKind) {
        if self.form.kind() != kind {
            self.form = PostForm::empty(kind);
        }
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        match &mut self.form {
            PostForm::Question(form) => form.title = value.into(),
            PostForm::Article(form) => form.title = value.into(),
        }
    }

    pub fn set_tags(&mut self, value: impl Into<String>) {
        match &mut self.form {
            PostForm::Question(form) => form.tags = value.into(),
            PostForm::Article(form) => form.tags = value.into(),
        }
    }

    /// Question only; ignored while the article form is shown.
    pub fn set_description(&mut self, value: impl Into<String>) {
        if let PostForm::Question(form) = &mut self.form {
            form.description = value.into();
        }
    }

    /// Article only; ignored while the question form is shown.
    pub fn set_abstract(&mut self, value: impl Into<String>) {
        if let PostForm::Article(form) = &mut self.form {
            form.summary = value.into();
        }
    }

    /// Article only; ignored while the question form is shown.
    pub fn set_content(&mut self, value: impl Into<String>) {
        if let PostForm::Article(form) = &mut self.form {
            form.content = value.into();
        }
    }

    /// Replace the attached image. `None` means the picker was dismissed and keeps the
    /// current selection.
    pub fn choose_image(&mut self, image: Option<ImageFile>) {
        if let Some(image) = image {
            *self.form.image_slot() = Some(image);
        }
    }

    pub fn image(&self) -> Option<&ImageFile> {
        match &self.form {
            PostForm::Question(form) => form.image.as_ref(),
            PostForm::Article(form) => form.image.as_ref(),
        }
    }

    /// Send the current form. The form keeps its contents either way.
    pub async fn submit<S: PostService + ?Sized>(&self, service: &S) -> SubmitOutcome {
        let (post, image) = self.form.submission();
        let kind = post.kind();

        match service.create_post(post, image).await {
            Ok(id) => SubmitOutcome::Saved {
                id,
                notice: SUCCESS_NOTICE,
            },
            Err(err) => {
                tracing::error!("Saving {} post failed: {}", kind.as_str(), err);
                SubmitOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::blob::MemoryBlobStore;
    use crate::models::POSTS_COLLECTION;
    use crate::service::testing::FlakyDocumentStore;
    use crate::service::BackendPostService;
    use crate::store::{DocumentStore, MemoryDocumentStore};

    #[test]
    fn test_defaults_to_question() {
        let composer = Composer::new();
        assert_eq!(composer.kind(), PostKind::Question);
        assert!(composer.image().is_none());
    }

    #[test]
    fn test_switching_kind_discards_form() {
        let mut composer = Composer::new();
        composer.set_title("half written");
        composer.select_kind(PostKind::Question);
        assert!(matches!(composer.form(), PostForm::Question(f) if f.title == "half written"));

        composer.select_kind(PostKind::Article);
        composer.select_kind(PostKind::Question);
        assert_eq!(composer.form(), &PostForm::empty(PostKind::Question));
    }

    #[test]
    fn test_setters_for_other_kind_are_ignored() {
        let mut composer = Composer::new();
        composer.set_abstract("nope");
        composer.set_content("nope");
        assert_eq!(composer.form(), &PostForm::empty(PostKind::Question));

        composer.select_kind(PostKind::Article);
        composer.set_description("nope");
        assert_eq!(composer.form(), &PostForm::empty(PostKind::Article));
    }

    #[test]
    fn test_choose_image_replaces_and_cancel_keeps() {
        let mut composer = Composer::new();
        composer.choose_image(Some(ImageFile::new("first.png", vec![1])));
        composer.choose_image(Some(ImageFile::new("second.png", vec![2])));
        composer.choose_image(None);
        assert_eq!(composer.image().unwrap().name, "second.png");
    }

    #[tokio::test]
    async fn test_submit_question_persists_fields() {
        let documents = Arc::new(MemoryDocumentStore::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let service = BackendPostService::new(documents.clone(), blobs.clone());

        let mut composer = Composer::new();
        composer.set_title("How?");
        composer.set_description("Details");
        composer.set_tags("rust tokio");

        let outcome = composer.submit(&service).await;
        assert_eq!(outcome.notice(), Some(SUCCESS_NOTICE));
        let SubmitOutcome::Saved { id, .. } = outcome else {
            panic!("expected a saved post");
        };

        let doc = documents.get(POSTS_COLLECTION, &id).await.unwrap().unwrap();
        assert_eq!(doc.data["title"], "How?");
        assert_eq!(doc.data["description"], "Details");
        assert_eq!(doc.data["tags"], "rust tokio");
        assert_eq!(doc.data["imageUrl"], "");
        assert!(blobs.uploads().await.is_empty());
        // Form keeps its contents after submit
        assert!(matches!(composer.form(), PostForm::Question(f) if f.title == "How?"));
    }

    #[tokio::test]
    async fn test_submit_empty_article_with_image() {
        let documents = Arc::new(MemoryDocumentStore::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let service = BackendPostService::new(documents.clone(), blobs.clone());

        let mut composer = Composer::new();
        composer.select_kind(PostKind::Article);
        composer.choose_image(Some(ImageFile::new("cover.jpg", vec![0xff, 0xd8])));

        let SubmitOutcome::Saved { id, .. } = composer.submit(&service).await else {
            panic!("expected a saved post");
        };

        let doc = documents.get(POSTS_COLLECTION, &id).await.unwrap().unwrap();
        assert_eq!(doc.data["type"], "article");
        assert_eq!(doc.data["title"], "");
        assert_eq!(doc.data["abstract"], "");
        assert_eq!(doc.data["imageUrl"], "memory://blobs/images/cover.jpg");
        assert_eq!(blobs.uploads().await, vec!["images/cover.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_failure_gives_no_notice() {
        let documents = Arc::new(FlakyDocumentStore {
            fail_insert: true,
            ..Default::default()
        });
        let service = BackendPostService::new(documents, Arc::new(MemoryBlobStore::new()));

        let outcome = Composer::new().submit(&service).await;
        assert!(outcome.notice().is_none());
        assert!(matches!(outcome, SubmitOutcome::Failed(AppError::Insert(_))));
    }
}
