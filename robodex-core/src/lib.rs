//! Robodex Core - Entity Types
//!
//! Pure data structures shared by the storage and API crates.
//! Records have no identifier field: a robot is addressed by its position
//! in the stored sequence.

pub mod error;

pub use error::{RobotError, RobotResult, StorageError};

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Public URL prefix under which uploaded images are served.
pub const IMAGE_URL_PREFIX: &str = "/static/images/";

/// Content-type prefix an upload must carry to be accepted as an image.
pub const IMAGE_CONTENT_TYPE_PREFIX: &str = "image/";

/// Build the public URL path for an uploaded image file name.
pub fn image_url(file_name: &str) -> String {
    format!("{}{}", IMAGE_URL_PREFIX, file_name)
}

// ============================================================================
// ROBOT RECORD
// ============================================================================

/// A single robot entry as persisted in the record file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    pub author: String,
    pub name: String,
    pub description: String,
    /// Public URL paths, in upload order.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Robot {
    pub fn new(
        author: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        images: Vec<String>,
    ) -> Self {
        Self {
            author: author.into(),
            name: name.into(),
            description: description.into(),
            images,
        }
    }

    /// Overwrite every field the patch supplies, leaving the rest untouched.
    ///
    /// Returns `true` if any field changed.
    pub fn apply(&mut self, patch: &RobotPatch) -> bool {
        let mut changed = false;
        if let Some(author) = supplied(&patch.author) {
            self.author = author.to_string();
            changed = true;
        }
        if let Some(name) = supplied(&patch.name) {
            self.name = name.to_string();
            changed = true;
        }
        if let Some(description) = supplied(&patch.description) {
            self.description = description.to_string();
            changed = true;
        }
        changed
    }

    /// Append image paths after the existing ones.
    pub fn append_images(&mut self, paths: impl IntoIterator<Item = String>) {
        self.images.extend(paths);
    }
}

// ============================================================================
// UPDATE TYPES
// ============================================================================

/// Partial update for a robot. Absent and empty values are both ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotPatch {
    pub author: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl RobotPatch {
    /// True when no field would be applied.
    pub fn is_empty(&self) -> bool {
        supplied(&self.author).is_none()
            && supplied(&self.name).is_none()
            && supplied(&self.description).is_none()
    }
}

/// Treat an empty string the same as an absent value.
pub fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// ============================================================================
// UPLOADS
// ============================================================================

/// One uploaded file part, as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name declared by the client.
    pub file_name: String,
    /// Declared MIME type, if the client sent one.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<&str>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.map(str::to_string),
            bytes: bytes.into(),
        }
    }

    /// Whether the declared content type marks this upload as an image.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with(IMAGE_CONTENT_TYPE_PREFIX))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Robot {
        Robot::new(
            "ada",
            "Unit-1",
            "welding arm",
            vec![image_url("unit1.png")],
        )
    }

    #[test]
    fn test_image_url_has_public_prefix() {
        assert_eq!(image_url("a.png"), "/static/images/a.png");
    }

    #[test]
    fn test_apply_only_overwrites_supplied_fields() {
        let mut robot = sample();
        let patch = RobotPatch {
            name: Some("X".to_string()),
            author: Some(String::new()),
            description: None,
        };

        assert!(robot.apply(&patch));
        assert_eq!(robot.name, "X");
        assert_eq!(robot.author, "ada");
        assert_eq!(robot.description, "welding arm");
        assert_eq!(robot.images, vec!["/static/images/unit1.png".to_string()]);
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut robot = sample();
        let patch = RobotPatch::default();
        assert!(patch.is_empty());
        assert!(!robot.apply(&patch));
        assert_eq!(robot, sample());
    }

    #[test]
    fn test_append_images_keeps_existing() {
        let mut robot = sample();
        robot.append_images(vec![image_url("b.png")]);
        assert_eq!(
            robot.images,
            vec![
                "/static/images/unit1.png".to_string(),
                "/static/images/b.png".to_string()
            ]
        );
    }

    #[test]
    fn test_missing_images_field_defaults_to_empty() {
        let robot: Robot =
            serde_json::from_str(r#"{"author":"a","name":"n","description":"d"}"#).unwrap();
        assert!(robot.images.is_empty());
    }

    #[test]
    fn test_is_image_checks_content_type_prefix() {
        assert!(ImageUpload::new("a.png", Some("image/png"), vec![1]).is_image());
        assert!(!ImageUpload::new("a.txt", Some("text/plain"), vec![1]).is_image());
        assert!(!ImageUpload::new("a.bin", None, vec![1]).is_image());
    }
}
