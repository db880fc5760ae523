use std::{io, path::PathBuf};

use derive_more::Display;

pub type Result<T> = std::result::Result<T, HuffmanError>;

#[derive(Debug, Display)]
pub enum HuffmanError {
    #[display(fmt = "input file {} not found", "_0.display()")]
    InputNotFound(PathBuf, io::Error),

    #[display(fmt = "io error: {}", _0)]
    Io(io::Error),

    #[display(fmt = "malformed header: {}", _0)]
    MalformedHeader(String),

    #[display(fmt = "malformed bitstream: {}", _0)]
    MalformedBitstream(String),

    #[display(fmt = "no code for symbol {}", _0)]
    MissingCode(u8),
}

impl HuffmanError {
    pub(crate) fn malformed_header(reason: impl Into<String>) -> Self {
        HuffmanError::MalformedHeader(reason.into())
    }

    pub(crate) fn malformed_bitstream(reason: impl Into<String>) -> Self {
        HuffmanError::MalformedBitstream(reason.into())
    }
}

impl std::error::Error for HuffmanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HuffmanError::InputNotFound(_, err) | HuffmanError::Io(err) => Some(err),
            HuffmanError::MalformedHeader(_)
            | HuffmanError::MalformedBitstream(_)
            | HuffmanError::MissingCode(_) => None,
        }
    }
}

impl From<io::Error> for HuffmanError {
    fn from(err: io::Error) -> Self {
        HuffmanError::Io(err)
    }
}
