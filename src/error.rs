use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BadgeError {
    #[error("Failed to load image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Badge size is invalid. Please upload a 512x512 image. (got {width}x{height})")]
    InvalidSize { width: u32, height: u32 },

    #[error("Nontransparent pixels should be within a circle.")]
    InvalidTransparencyRegion,

    #[error("The colors of the badge should give a 'happy' feeling.")]
    InvalidMood,

    #[error("Badge has no alpha channel; transparency cannot be checked.")]
    ChannelAccess,

    #[error("Failed to write badge {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode badge {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Discriminant of a [`BadgeError`], for callers that branch on the failure
/// rather than print it.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Decode,
    InvalidSize,
    InvalidTransparencyRegion,
    InvalidMood,
    ChannelAccess,
    Write,
    Encode,
}

impl BadgeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            BadgeError::Decode { .. } => FailureKind::Decode,
            BadgeError::InvalidSize { .. } => FailureKind::InvalidSize,
            BadgeError::InvalidTransparencyRegion => FailureKind::InvalidTransparencyRegion,
            BadgeError::InvalidMood => FailureKind::InvalidMood,
            BadgeError::ChannelAccess => FailureKind::ChannelAccess,
            BadgeError::Write { .. } => FailureKind::Write,
            BadgeError::Encode { .. } => FailureKind::Encode,
        }
    }

    /// True when the image was processed and judged invalid, false when it
    /// could not be processed at all.
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            BadgeError::InvalidSize { .. }
                | BadgeError::InvalidTransparencyRegion
                | BadgeError::InvalidMood
        )
    }
}

pub type Result<T> = std::result::Result<T, BadgeError>;
