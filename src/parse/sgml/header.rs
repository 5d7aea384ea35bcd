//! Splitting of an OFX document into its header properties and its markup payload.

use log::debug;
use nom::{
    bytes::complete::{tag, take_until1},
    combinator::{not, rest},
    error::{Error as BriefError, ParseError},
    sequence::terminated,
    IResult,
};

use crate::ofx::header::HeaderProperties;

/// The start tag opening the markup payload.
pub(crate) const ROOT_START_TAG: &str = "<OFX>";

/// A document split into its two sections.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SplitDocument {
    pub properties: HeaderProperties,
    pub payload: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Section {
    Header,
    Payload,
}

/// Parses a `NAME:value` header line.
///
/// Only the first colon separates; the value is everything after it, and is absent when empty.
fn property<'a, E>(line: &'a str) -> IResult<&'a str, (&'a str, Option<&'a str>), E>
where
    E: ParseError<&'a str>,
{
    let (input, _) = not(tag("<"))(line)?;
    let (input, name) = terminated(take_until1(":"), tag(":"))(input)?;
    let (input, value) = rest(input)?;
    Ok((input, (name, Some(value).filter(|v| !v.is_empty()))))
}

/// Classifies every line of `text` as a header property or a piece of the payload.
///
/// Lines are trimmed first. Everything from the first line starting with `<OFX>` on is payload
/// and is concatenated without separators; before that, lines which are not properties are
/// dropped.
pub(crate) fn split_lines(text: &str) -> SplitDocument {
    let mut document = SplitDocument::default();
    let mut section = Section::Header;

    for line in text.split(|c| c == '\n' || c == '\r').map(str::trim) {
        if section == Section::Header && line.starts_with(ROOT_START_TAG) {
            section = Section::Payload;
        }

        match section {
            Section::Header => {
                if let Ok((_, (name, value))) = property::<BriefError<&str>>(line) {
                    document
                        .properties
                        .insert(String::from(name), value.map(String::from));
                }
            }
            Section::Payload => document.payload.push_str(line),
        }
    }

    debug!(
        "split {} header properties from a payload of {} bytes",
        document.properties.len(),
        document.payload.len()
    );
    document
}
