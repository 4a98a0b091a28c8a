//! Service layer.
//!
//! Services own the domain behavior; route handlers only translate HTTP
//! requests into service calls.

pub mod ingestor;
pub mod robot_service;

pub use ingestor::{stored_file_name, ImageIngestor, IngestMode};
pub use robot_service::{NewRobot, RobotService};
