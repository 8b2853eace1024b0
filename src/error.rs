//! Construction-time errors
//!
//! Everything that can go wrong is caught before the first frame; the frame
//! loop itself has no error path.

/// Errors raised while building an animation.
#[derive(Debug)]
pub enum Error {
    /// A setting is outside its valid range
    InvalidSetting { name: &'static str, reason: String },
    /// The light table has no points
    EmptyGeometry,
    /// The grid produced no bricks, so the game could never be won or lost
    NoBricks { num_sections: u32, num_bands: u32 },
    /// Settings or geometry JSON could not be parsed
    Json(serde_json::Error),
    /// Settings or geometry file could not be read
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSetting { name, reason } => write!(f, "invalid setting `{}`: {}", name, reason),
            Self::EmptyGeometry => write!(f, "light table is empty"),
            Self::NoBricks { num_sections, num_bands } => write!(
                f,
                "{} sections x {} bands produced no bricks in the playable height range",
                num_sections, num_bands
            ),
            Self::Json(e) => write!(f, "json: {}", e),
            Self::Io(e) => write!(f, "io: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
