//! Request and response types for the HTTP layer.

use std::collections::HashMap;

use robodex_core::{ImageUpload, Robot, RobotPatch};
use serde::{Deserialize, Serialize};

use crate::services::NewRobot;

/// Body returned by every mutating route: a message plus the full list,
/// so clients can resynchronize without a follow-up `GET /robots`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotsResponse {
    pub message: String,
    pub robots: Vec<Robot>,
}

impl RobotsResponse {
    pub fn new(message: impl Into<String>, robots: Vec<Robot>) -> Self {
        Self {
            message: message.into(),
            robots,
        }
    }
}

/// Fields collected from a multipart or urlencoded robot form.
#[derive(Debug, Clone, Default)]
pub struct RobotForm {
    pub author: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub images: Vec<ImageUpload>,
}

impl RobotForm {
    /// Build a form from urlencoded text fields. Unknown keys are ignored.
    pub fn from_text_fields(mut fields: HashMap<String, String>) -> Self {
        Self {
            author: fields.remove("author"),
            name: fields.remove("name"),
            description: fields.remove("description"),
            images: Vec::new(),
        }
    }

    pub fn into_new_robot(self) -> NewRobot {
        NewRobot {
            author: self.author,
            name: self.name,
            description: self.description,
            images: self.images,
        }
    }

    pub fn into_patch(self) -> (RobotPatch, Vec<ImageUpload>) {
        let patch = RobotPatch {
            author: self.author,
            name: self.name,
            description: self.description,
        };
        (patch, self.images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_response_serialization() {
        let response = RobotsResponse::new(
            "Robot added",
            vec![Robot::new("a", "n", "d", vec!["/static/images/x.png".to_string()])],
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["message"], "Robot added");
        assert_eq!(json["robots"][0]["images"][0], "/static/images/x.png");
    }

    #[test]
    fn test_form_into_patch() {
        let form = RobotForm {
            name: Some("X".to_string()),
            ..RobotForm::default()
        };
        let (patch, images) = form.into_patch();
        assert_eq!(patch.name.as_deref(), Some("X"));
        assert!(patch.author.is_none());
        assert!(images.is_empty());
    }
}
