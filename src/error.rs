use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems loading a puzzle or saving its picture. An unsolvable puzzle is not an error; see `solve`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unreadable font")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("structure has no rows")]
    EmptyStructure,

    #[error("word list has no words")]
    EmptyWordList,

    #[error("structure has no slots of two or more cells")]
    NoSlots,
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Error::Image {
            path: path.into(),
            source,
        }
    }
}
