use std::{borrow::Cow, fs, path::Path, str::FromStr};

use encoding_rs::WINDOWS_1252;
use log::debug;

use self::header::{HeaderProperties, OfxHeader};
use self::response::*;
use crate::element::{Cursor, Element};
use crate::error::{Error, Result, Warn};
use crate::options::ParseOptions;
use crate::parse::sgml::{parse_payload, split_lines, SplitDocument};
use crate::parse::value::DatePattern;

pub mod header;
pub mod response;

/// A parsed OFX document.
///
/// The whole input is read and parsed up front; the accessors are read-only queries against the
/// resulting tree and can be called any number of times, in any order.
#[derive(Clone, Debug)]
pub struct Ofx {
    properties: HeaderProperties,
    root: Element,
    dates: DatePattern,
}

/// Decodes the raw bytes of a document. OFX 1.x files are commonly Windows-1252 rather than
/// UTF-8, so anything which is not valid UTF-8 is read as the former.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text)),
        Err(_) => {
            debug!("input is not UTF-8, decoding as windows-1252");
            WINDOWS_1252.decode_without_bom_handling(bytes).0
        }
    }
}

impl Ofx {
    /// Reads the document at `path` with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &ParseOptions::default())
    }

    /// Reads the document at `path`.
    pub fn open_with(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let bytes = fs::read(path).map_err(|e| Error::Io(e.to_string()))?;
        debug!("read {} bytes from {}", bytes.len(), path.display());
        Self::from_bytes(&bytes, options)
    }

    /// Parses a document from its raw bytes.
    pub fn from_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Self> {
        Self::parse_with(&decode(bytes), options)
    }

    /// Parses a document from text.
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Self> {
        let dates = DatePattern::new(&options.date_format)?;
        let SplitDocument {
            properties,
            payload,
        } = split_lines(text);
        let root = parse_payload(&payload)?;

        Ok(Ofx {
            properties,
            root,
            dates,
        })
    }

    /// The header properties, exactly as found before the markup.
    pub fn properties(&self) -> &HeaderProperties {
        &self.properties
    }

    /// The header properties interpreted as the standard OFX header elements.
    pub fn header(&self) -> Warn<OfxHeader> {
        OfxHeader::from_properties(&self.properties)
    }

    /// The root `<OFX>` element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.root)
    }

    pub fn sign_on_info(&self) -> Result<SignOnInfo> {
        SignOnInfo::extract(&self.cursor(), &self.dates)
    }

    pub fn transaction_response_header(&self) -> Result<TransactionResponseHeader> {
        TransactionResponseHeader::extract(&self.cursor())
    }

    pub fn account_info(&self) -> Result<AccountInfo> {
        AccountInfo::extract(&self.cursor())
    }

    pub fn movements(&self) -> Result<MovementsWindow> {
        MovementsWindow::extract(&self.cursor(), &self.dates)
    }

    pub fn balance(&self) -> Result<LedgerBalance> {
        LedgerBalance::extract(&self.cursor(), &self.dates)
    }
}

impl FromStr for Ofx {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with(s, &ParseOptions::default())
    }
}
