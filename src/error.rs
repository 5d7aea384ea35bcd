use std::path::PathBuf;

use thiserror::Error;

/// Errors which abort the parsing of a document or the extraction of a record from it.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("no such file `{}`", .0.display())]
    FileNotFound(PathBuf),
    #[error("failed to read input: {0}")]
    Io(String),
    #[error("malformed markup:\n{0}")]
    MarkupMalformed(String),
    #[error("element not found at `{0}`")]
    NodeNotFound(String),
    #[error("invalid date `{0}`")]
    DateFormatInvalid(String),
    #[error("invalid amount `{0}`")]
    AmountFormatInvalid(String),
    #[error("invalid date pattern `{0}`")]
    InvalidDatePattern(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum OfxParseWarning {
    #[error("unrecognized OFXHEADER value `{0}`")]
    UnrecognizedOfxHeaderVersion(u32),
    #[error("unrecognized VERSION value `{0}`")]
    UnrecognizedVersion(u32),
    #[error("unrecognized DATA value `{0}`")]
    UnrecognizedContentType(String),
    #[error("unrecognized SECURITY value `{0}`")]
    UnrecognizedSecurityType(String),
    #[error("unrecognized ENCODING value `{0}`")]
    UnrecognizedEncoding(String),
    #[error("unrecognized CHARSET value `{0}`")]
    UnrecognizedCharset(String),
    #[error("missing header element `{0}`")]
    MissingHeaderElement(&'static str),
    #[error("non-numeric {name} value `{value}`")]
    InvalidHeaderNumber { name: &'static str, value: String },
}

/// A value together with the non-fatal problems found while producing it.
#[derive(Clone, Debug, PartialEq)]
pub struct Warn<T> {
    pub value: T,
    pub warnings: Vec<OfxParseWarning>,
}

impl<T> From<T> for Warn<T> {
    fn from(value: T) -> Self {
        Warn {
            value,
            warnings: Vec::new(),
        }
    }
}
