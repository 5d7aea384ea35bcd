//! Parsers for SGML-based (v1.x) OFX documents.
//!
//! Parsing happens in two phases: the raw text is split into header properties and a markup
//! payload, then the payload has its unclosed leaf elements closed and is parsed strictly into an
//! [`Element`] tree.

use log::debug;
use nom::error::VerboseError;

use crate::element::Element;
use crate::error::Result;
use crate::parse::malformed;

pub(crate) mod element;
pub(crate) mod header;
pub(crate) mod normalize;

pub(crate) use self::header::{split_lines, SplitDocument};

/// Builds the element tree of a markup payload.
pub(crate) fn parse_payload(payload: &str) -> Result<Element> {
    let normalized = normalize::normalize(payload)?;
    let (_, root) = element::document::<VerboseError<&str>>(&normalized)
        .map_err(|e| malformed(&normalized, e))?;
    debug!(
        "parsed <{}> with {} elements",
        root.name,
        root.descendant_count() + 1
    );
    Ok(root)
}
