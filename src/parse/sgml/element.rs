//! Parsers for OFX SGML elements.

use std::borrow::Cow;

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_until, take_while},
    character::complete::{multispace0, satisfy},
    combinator::{eof, map, recognize, value},
    error::ParseError,
    multi::many0,
    sequence::{delimited, pair, terminated},
    IResult, Parser,
};

use crate::element::Element;

/// Consumes whitespace before the provided parser.
pub(crate) fn whitespace_preceded<'a, O, E, P>(
    mut p: P,
) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    E: ParseError<&'a str>,
    P: Parser<&'a str, O, E>,
{
    move |input: &str| {
        let (input, _) = multispace0(input)?;
        p.parse(input)
    }
}

/// Parses the name of a tag.
///
/// Besides letters and digits, `.` and `_` are accepted so that extension elements such as
/// `INTU.BID` parse like any other.
fn tag_name<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str>,
{
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '.' || c == '_'),
    ))(input)
}

/// Parses the start tag of an element.
pub(crate) fn any_start_tag<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str>,
{
    delimited(tag("<"), tag_name, tag(">"))(input)
}

/// Parses the end tag of an element.
pub(crate) fn any_end_tag<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str>,
{
    delimited(tag("</"), tag_name, tag(">"))(input)
}

/// Parses a named end tag of an element.
pub(crate) fn end_tag<'a, E>(name: &'a str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str>,
{
    delimited(tag("</"), tag(name), tag(">"))
}

/// Parses a `<![CDATA[...]]>` section, yielding its contents.
pub(crate) fn cdata<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str>,
{
    delimited(tag("<![CDATA["), take_until("]]>"), tag("]]>"))(input)
}

/// Parses the value of an element.
pub(crate) fn elem_value<'a, E>(input: &'a str) -> IResult<&'a str, Cow<'a, str>, E>
where
    E: ParseError<&'a str>,
{
    let (input, chunks) = many0(alt((
        is_not("<&"),
        value("<", tag("&lt;")),
        value(">", tag("&gt;")),
        value("&", tag("&amp;")),
        value(" ", tag("&nbsp;")),
        cdata,
        tag("&"),
    )))(input)?;

    Ok((
        input,
        match chunks.len() {
            0 => Cow::Borrowed(""),
            1 => Cow::Borrowed(chunks[0]),
            _ => Cow::Owned(chunks.concat()),
        },
    ))
}

/// Parses a well-formed element and everything within it.
///
/// An element holding only text becomes a leaf with the text trimmed; anything else must be a
/// sequence of child elements followed by the matching end tag.
pub(crate) fn element<'a, E>(input: &'a str) -> IResult<&'a str, Element, E>
where
    E: ParseError<&'a str>,
{
    let (input, name) = whitespace_preceded(any_start_tag)(input)?;
    alt((
        map(terminated(elem_value, end_tag(name)), |text| {
            Element::leaf(name, text.trim())
        }),
        map(
            terminated(many0(element), whitespace_preceded(end_tag(name))),
            |children| Element::aggregate(name, children),
        ),
    ))(input)
}

/// Parses a whole markup payload, which must hold exactly one root element.
pub(crate) fn document<'a, E>(input: &'a str) -> IResult<&'a str, Element, E>
where
    E: ParseError<&'a str>,
{
    terminated(element, pair(multispace0, eof))(input)
}
