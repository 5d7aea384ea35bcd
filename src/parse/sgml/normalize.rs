//! Closing of unterminated leaf elements.
//!
//! OFX 1.x lets elements which hold a value omit their end tag, so `<CODE>0<SEVERITY>INFO` is as
//! valid as `<CODE>0</CODE><SEVERITY>INFO</SEVERITY>`. Before the payload is parsed as strict
//! markup, every start tag directly followed by non-blank text and then by anything other than its
//! own end tag gets that end tag inserted right after the text. Aggregates are never touched, so
//! a payload with an unbalanced aggregate still fails to parse afterwards.
//!
//! This pass is also where nesting depth is bounded: the strict grammar recurses once per level,
//! so a payload nested deeper than [`MAX_DEPTH`] is rejected here as malformed.

use log::{debug, trace};
use nom::{
    branch::alt,
    bytes::complete::is_not,
    combinator::{consumed, map, recognize},
    error::{ParseError, VerboseError},
    multi::many1,
    IResult,
};

use crate::error::{Error, Result};
use crate::parse::malformed;
use crate::parse::sgml::element::{any_end_tag, any_start_tag, cdata};

/// The deepest element nesting accepted in a payload, counting the root as depth 1.
pub(crate) const MAX_DEPTH: usize = 128;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token<'a> {
    Start(&'a str),
    End(&'a str),
    Text(&'a str),
}

/// Parses raw character data, keeping escapes and CDATA sections as written.
fn raw_text<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str>,
{
    recognize(many1(alt((recognize(cdata), is_not("<")))))(input)
}

fn token<'a, E>(input: &'a str) -> IResult<&'a str, Token<'a>, E>
where
    E: ParseError<&'a str>,
{
    alt((
        map(any_start_tag, Token::Start),
        map(any_end_tag, Token::End),
        map(raw_text, Token::Text),
    ))(input)
}

fn push_end_tag(output: &mut String, name: &str) {
    trace!("closing leaf element <{name}>");
    output.push_str("</");
    output.push_str(name);
    output.push('>');
}

/// Returns `payload` with an end tag inserted after every unterminated leaf element.
pub(crate) fn normalize(payload: &str) -> Result<String> {
    let mut output = String::with_capacity(payload.len() + payload.len() / 4);
    // The most recent start tag, while nothing but text has followed it.
    let mut last_start: Option<&str> = None;
    // A leaf whose value has been copied but whose end tag has not been seen yet.
    let mut open_leaf: Option<&str> = None;
    let mut synthesized = 0usize;
    let mut depth = 0usize;

    let mut input = payload;
    while !input.is_empty() {
        let (rest, (raw, token)) = consumed(token::<VerboseError<&str>>)(input)
            .map_err(|e| malformed(payload, e))?;

        match token {
            Token::Text(text) => {
                if let Some(name) = last_start.take() {
                    if !text.trim().is_empty() {
                        open_leaf = Some(name);
                    }
                }
            }
            Token::End(name) if open_leaf == Some(name) => {
                open_leaf = None;
                last_start = None;
                depth = depth.saturating_sub(1);
            }
            Token::Start(_) | Token::End(_) => {
                if let Some(name) = open_leaf.take() {
                    push_end_tag(&mut output, name);
                    synthesized += 1;
                    depth = depth.saturating_sub(1);
                }
                match token {
                    Token::Start(name) => {
                        depth += 1;
                        if depth > MAX_DEPTH {
                            return Err(Error::MarkupMalformed(format!(
                                "<{name}> is nested deeper than {MAX_DEPTH} elements"
                            )));
                        }
                        last_start = Some(name);
                    }
                    _ => {
                        depth = depth.saturating_sub(1);
                        last_start = None;
                    }
                }
            }
        }
        output.push_str(raw);
        input = rest;
    }
    if let Some(name) = open_leaf {
        push_end_tag(&mut output, name);
        synthesized += 1;
    }

    debug!("synthesized {synthesized} end tags");
    Ok(output)
}
