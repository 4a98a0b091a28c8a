//! Robot Service
//!
//! Implements create/update/delete/list as independent load → mutate →
//! persist cycles over the record store. Nothing is held between calls and
//! concurrent mutations are not serialized: the last writer wins.

use std::sync::Arc;

use robodex_core::{supplied, ImageUpload, Robot, RobotError, RobotPatch, RobotResult};
use robodex_storage::RecordStore;

use super::ingestor::{ImageIngestor, IngestMode};

/// Fields submitted to create a robot. Empty strings count as missing.
#[derive(Debug, Clone, Default)]
pub struct NewRobot {
    pub author: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub images: Vec<ImageUpload>,
}

/// Orchestrates the record store and the image ingestor.
#[derive(Clone)]
pub struct RobotService {
    records: Arc<dyn RecordStore>,
    ingestor: ImageIngestor,
}

impl RobotService {
    pub fn new(records: Arc<dyn RecordStore>, ingestor: ImageIngestor) -> Self {
        Self { records, ingestor }
    }

    /// Return the stored robots unchanged.
    pub async fn list(&self) -> RobotResult<Vec<Robot>> {
        Ok(self.records.load().await?)
    }

    /// Validate, ingest images, append the new robot and persist.
    pub async fn create(&self, new: NewRobot) -> RobotResult<Vec<Robot>> {
        let (author, name, description) = match (
            supplied(&new.author),
            supplied(&new.name),
            supplied(&new.description),
        ) {
            (Some(author), Some(name), Some(description)) if !new.images.is_empty() => {
                (author, name, description)
            }
            _ => return Err(RobotError::MissingFields),
        };

        let paths = self.ingestor.ingest(&new.images, IngestMode::Strict).await?;
        let robot = Robot::new(author, name, description, paths);

        let mut robots = self.records.load().await?;
        robots.push(robot);
        self.records.replace_all(&robots).await?;

        tracing::info!(index = robots.len() - 1, count = robots.len(), "Robot added");
        Ok(robots)
    }

    /// Overwrite supplied fields of the robot at `index` and append new images.
    ///
    /// Uploads that are not images are skipped rather than failing the update.
    pub async fn update(
        &self,
        index: i64,
        patch: RobotPatch,
        images: Vec<ImageUpload>,
    ) -> RobotResult<Vec<Robot>> {
        let mut robots = self.records.load().await?;
        let position = checked_index(index, robots.len())?;

        let paths = if images.is_empty() {
            Vec::new()
        } else {
            self.ingestor.ingest(&images, IngestMode::SkipInvalid).await?
        };

        let robot = &mut robots[position];
        robot.apply(&patch);
        robot.append_images(paths);

        self.records.replace_all(&robots).await?;

        tracing::info!(index, count = robots.len(), "Robot updated");
        Ok(robots)
    }

    /// Remove the robot at `index`; later robots shift down by one.
    pub async fn delete(&self, index: i64) -> RobotResult<Vec<Robot>> {
        let mut robots = self.records.load().await?;
        let position = checked_index(index, robots.len())?;

        robots.remove(position);
        self.records.replace_all(&robots).await?;

        tracing::info!(index, count = robots.len(), "Robot deleted");
        Ok(robots)
    }
}

/// Map a signed index onto `[0, len)`.
fn checked_index(index: i64, len: usize) -> RobotResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(RobotError::InvalidIndex { index, len })
}
