use std::{io, path::PathBuf, process::ExitStatus};

use fea_rs::compile::error::CompilerError;
use thiserror::Error;
use write_fonts::{read::ReadError, BuilderError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected input .fea file, found '{0}'")]
    NotFeaFile(PathBuf),
    #[error("'{0}' exists but is not a directory")]
    ExpectedDirectory(PathBuf),
    #[error("io failed for '{path}': '{source}'")]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write to stdout or stderr: '{0}'")]
    StdioWriteFail(#[source] io::Error),
    #[error("could not read font data: '{0}'")]
    FontRead(#[from] ReadError),
    #[error("could not read glyph names: '{0}'")]
    GlyphOrder(String),
    #[error("Fea compilation failure: {0}")]
    FeaCompile(#[from] CompilerError),
    #[error("failed to assemble font: '{0}'")]
    FontBuild(#[from] BuilderError),
    #[error("could not launch '{tool}': '{source}'")]
    ToolLaunch {
        tool: String,
        #[source]
        source: io::Error,
    },
    #[error("'{tool}' failed ({status}):\n{stderr}")]
    ToolFailed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("Missing file '{0}'")]
    MissingOutput(PathBuf),
}

impl Error {
    pub(crate) fn file_io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Error {
        let path = path.into();
        move |source| Error::FileIo { path, source }
    }
}
