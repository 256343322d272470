//! Image attachment selected in the composer.

/// Folder in the blob store that receives post images.
pub const IMAGE_FOLDER: &str = "images";

/// A single image file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original file name, also used as the storage key
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Blob path for this file. Two files with the same name share a path.
    pub fn storage_path(&self) -> String {
        format!("{}/{}", IMAGE_FOLDER, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_path_uses_file_name() {
        let image = ImageFile::new("cat.png", vec![1, 2, 3]);
        assert_eq!(image.storage_path(), "images/cat.png");
        assert_eq!(
            image.storage_path(),
            ImageFile::new("cat.png", vec![9]).storage_path()
        );
    }
}
