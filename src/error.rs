//! Error types for terrain streaming

use glam::IVec2;
use thiserror::Error;

/// Errors surfaced by the streaming world
#[derive(Debug, Error, PartialEq)]
pub enum WorldError {
    /// No observer position was available when streaming was started
    #[error("no observer to follow: streaming cannot start without an observer position")]
    NoObserver,

    /// A chunk was inserted at a coordinate that is already present
    #[error("chunk ({}, {}) is already present in the store", .0.x, .0.y)]
    DuplicateChunk(IVec2),

    /// Configuration values outside their valid range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, WorldError>;
