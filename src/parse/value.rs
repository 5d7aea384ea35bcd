//! Conversion of element values into dates and amounts.

use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{digit0, digit1, one_of},
    combinator::{all_consuming, opt, recognize},
    error::{Error as BriefError, ParseError},
    sequence::{pair, preceded, tuple},
    IResult,
};
use rust_decimal::Decimal;
use time::{
    format_description::{self, OwnedFormatItem},
    parsing::Parsed,
    Date,
};

use crate::error::{Error, Result};

/// The pattern used for dates unless configured otherwise: `YYYYMMDD`.
pub const DEFAULT_DATE_FORMAT: &str = "[year][month][day]";

/// A compiled date pattern, in the `time` crate's format description syntax.
#[derive(Clone, Debug)]
pub struct DatePattern {
    items: OwnedFormatItem,
    /// Whether an OFX time of day may follow the date; only for [`DEFAULT_DATE_FORMAT`].
    time_suffix: bool,
}

impl DatePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        format_description::parse_owned::<2>(pattern)
            .map(|items| DatePattern {
                items,
                time_suffix: pattern == DEFAULT_DATE_FORMAT,
            })
            .map_err(|e| Error::InvalidDatePattern(format!("{pattern}: {e}")))
    }

    /// Parses the date in `text`.
    ///
    /// With the default pattern the value is an OFX date-time, which carries the date first, so a
    /// time of day, fractional seconds and a bracketed zone (`20230115120000.000[-3:BRT]`) may
    /// follow the date and are ignored. Any other pattern must match the whole value.
    pub fn parse(&self, text: &str) -> Result<Date> {
        let invalid = || Error::DateFormatInvalid(String::from(text));
        let text = text.trim();

        let mut parsed = Parsed::new();
        let remaining = parsed
            .parse_item(text.as_bytes(), &self.items)
            .map_err(|_| invalid())?;
        if self.time_suffix {
            let remaining = std::str::from_utf8(remaining).map_err(|_| invalid())?;
            all_consuming(time_suffix::<BriefError<&str>>)(remaining).map_err(|_| invalid())?;
        } else if !remaining.is_empty() {
            return Err(invalid());
        }

        Date::try_from(parsed).map_err(|_| invalid())
    }
}

/// Parses what may follow the date in an OFX date-time: `HHMMSS.XXX[gmt offset:tz name]`.
fn time_suffix<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str>,
{
    recognize(tuple((
        digit0,
        opt(pair(tag("."), digit1)),
        opt(tuple((
            tag("["),
            take_while(|c: char| c != ']'),
            tag("]"),
        ))),
    )))(input)
}

/// Parses the textual form of an amount: an optional sign, then digits with at most one decimal
/// separator. Both `.` and `,` are accepted as the separator.
fn amount<'a, E>(input: &'a str) -> IResult<&'a str, (Option<char>, &'a str, Option<&'a str>), E>
where
    E: ParseError<&'a str>,
{
    alt((
        tuple((
            opt(one_of("+-")),
            digit1,
            opt(preceded(one_of(".,"), digit0)),
        )),
        tuple((
            opt(one_of("+-")),
            digit0,
            opt(preceded(one_of(".,"), digit1)),
        )),
    ))(input)
}

/// Parses a signed decimal amount.
pub fn parse_amount(text: &str) -> Result<Decimal> {
    let invalid = || Error::AmountFormatInvalid(String::from(text));

    let (_, (sign, int, frac)) =
        all_consuming(amount::<BriefError<&str>>)(text.trim()).map_err(|_| invalid())?;
    let frac = frac.unwrap_or_default();
    if int.is_empty() && frac.is_empty() {
        return Err(invalid());
    }

    let mut canonical = String::with_capacity(text.len() + 1);
    if sign == Some('-') {
        canonical.push('-');
    }
    canonical.push_str(if int.is_empty() { "0" } else { int });
    if !frac.is_empty() {
        canonical.push('.');
        canonical.push_str(frac);
    }
    Decimal::from_str(&canonical).map_err(|_| invalid())
}
