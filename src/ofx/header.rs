use std::collections::HashMap;

use serde::Serialize;

use crate::error::{OfxParseWarning, Warn};

/// The `NAME:value` lines preceding the markup of an OFX document. A property written with
/// nothing after its colon has no value.
pub type HeaderProperties = HashMap<String, Option<String>>;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum OfxContentType {
    OfxSgml,
    Unknown(String),
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum OfxSecurity {
    None,
    Type1,
    Unknown(String),
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum OfxEncoding {
    UsAscii,
    Utf8,
    Unknown(String),
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum OfxCharset {
    Latin1,
    WindowsLatin1,
    None,
    Unknown(String),
}

/// The header segment of an OFX document, interpreted from its [`HeaderProperties`].
///
/// Interpretation never fails. Each field is `None` when its `NAME:value` line is absent, which
/// is reported as a [`OfxParseWarning::MissingHeaderElement`]; values outside the known set are
/// kept and reported as well.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct OfxHeader {
    /// `OFXHEADER`, normally `100`. A non-numeric value leaves this `None` with a warning.
    pub header_version: Option<u32>,
    /// `DATA`, normally `OFXSGML`.
    pub data: Option<OfxContentType>,
    /// `VERSION`, one of `102`, `151` or `160` for SGML documents. A non-numeric value leaves
    /// this `None` with a warning.
    pub version: Option<u32>,
    /// `SECURITY`, `NONE` or `TYPE1`.
    pub security: Option<OfxSecurity>,
    /// `ENCODING`, `USASCII` or `UTF-8`. The document text has already been decoded by the time
    /// this is read, so it is informational only.
    pub encoding: Option<OfxEncoding>,
    /// `CHARSET`, one of `ISO-8859-1`, `1252` or `NONE`.
    pub charset: Option<OfxCharset>,
    /// `COMPRESSION`, kept as written.
    pub compression: Option<String>,
    /// `OLDFILEUID`, kept as written.
    pub old_file_uid: Option<String>,
    /// `NEWFILEUID`, kept as written.
    pub new_file_uid: Option<String>,
}

/// Looks up a header element, warning when it is absent altogether. A present element without a
/// value reads as an empty string.
fn elem<'a>(
    properties: &'a HeaderProperties,
    name: &'static str,
    warnings: &mut Vec<OfxParseWarning>,
) -> Option<&'a str> {
    match properties.get(name) {
        Some(value) => Some(value.as_deref().unwrap_or_default()),
        None => {
            warnings.push(OfxParseWarning::MissingHeaderElement(name));
            None
        }
    }
}

fn number_elem(
    properties: &HeaderProperties,
    name: &'static str,
    expected: &[u32],
    unrecognized: fn(u32) -> OfxParseWarning,
    warnings: &mut Vec<OfxParseWarning>,
) -> Option<u32> {
    let value = elem(properties, name, warnings)?;
    match value.trim().parse::<u32>() {
        Ok(number) => {
            if !expected.contains(&number) {
                warnings.push(unrecognized(number));
            }
            Some(number)
        }
        Err(_) => {
            warnings.push(OfxParseWarning::InvalidHeaderNumber {
                name,
                value: String::from(value),
            });
            None
        }
    }
}

fn content_type(value: &str, warnings: &mut Vec<OfxParseWarning>) -> OfxContentType {
    match value {
        "OFXSGML" => OfxContentType::OfxSgml,
        _ => {
            warnings.push(OfxParseWarning::UnrecognizedContentType(String::from(value)));
            OfxContentType::Unknown(String::from(value))
        }
    }
}

fn security(value: &str, warnings: &mut Vec<OfxParseWarning>) -> OfxSecurity {
    match value {
        "NONE" => OfxSecurity::None,
        "TYPE1" => OfxSecurity::Type1,
        _ => {
            warnings.push(OfxParseWarning::UnrecognizedSecurityType(String::from(value)));
            OfxSecurity::Unknown(String::from(value))
        }
    }
}

fn encoding(value: &str, warnings: &mut Vec<OfxParseWarning>) -> OfxEncoding {
    match value {
        "USASCII" => OfxEncoding::UsAscii,
        "UTF-8" => OfxEncoding::Utf8,
        _ => {
            warnings.push(OfxParseWarning::UnrecognizedEncoding(String::from(value)));
            OfxEncoding::Unknown(String::from(value))
        }
    }
}

fn charset(value: &str, warnings: &mut Vec<OfxParseWarning>) -> OfxCharset {
    match value {
        "ISO-8859-1" => OfxCharset::Latin1,
        "1252" => OfxCharset::WindowsLatin1,
        "NONE" => OfxCharset::None,
        _ => {
            warnings.push(OfxParseWarning::UnrecognizedCharset(String::from(value)));
            OfxCharset::Unknown(String::from(value))
        }
    }
}

impl OfxHeader {
    /// Interprets the header properties of a document.
    pub fn from_properties(properties: &HeaderProperties) -> Warn<OfxHeader> {
        let mut warnings = Vec::new();
        let w = &mut warnings;

        let header = OfxHeader {
            header_version: number_elem(
                properties,
                "OFXHEADER",
                &[100],
                OfxParseWarning::UnrecognizedOfxHeaderVersion,
                w,
            ),
            data: elem(properties, "DATA", w).map(|v| content_type(v, w)),
            version: number_elem(
                properties,
                "VERSION",
                &[102, 151, 160],
                OfxParseWarning::UnrecognizedVersion,
                w,
            ),
            security: elem(properties, "SECURITY", w).map(|v| security(v, w)),
            encoding: elem(properties, "ENCODING", w).map(|v| encoding(v, w)),
            charset: elem(properties, "CHARSET", w).map(|v| charset(v, w)),
            compression: elem(properties, "COMPRESSION", w).map(String::from),
            old_file_uid: elem(properties, "OLDFILEUID", w).map(String::from),
            new_file_uid: elem(properties, "NEWFILEUID", w).map(String::from),
        };

        Warn {
            value: header,
            warnings,
        }
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn properties(pairs: &[(&str, &str)]) -> HeaderProperties {
        pairs
            .iter()
            .map(|(k, v)| {
                let value = Some(String::from(*v)).filter(|v| !v.is_empty());
                (String::from(*k), value)
            })
            .collect()
    }

    #[test]
    fn from_properties__valid_header__ok() {
        let result = OfxHeader::from_properties(&properties(&[
            ("OFXHEADER", "100"),
            ("DATA", "OFXSGML"),
            ("VERSION", "102"),
            ("SECURITY", "NONE"),
            ("ENCODING", "USASCII"),
            ("CHARSET", "1252"),
            ("COMPRESSION", ""),
            ("OLDFILEUID", "NONE"),
            ("NEWFILEUID", "NONE"),
        ]));

        assert_eq!(
            result,
            Warn::from(OfxHeader {
                header_version: Some(100),
                data: Some(OfxContentType::OfxSgml),
                version: Some(102),
                security: Some(OfxSecurity::None),
                encoding: Some(OfxEncoding::UsAscii),
                charset: Some(OfxCharset::WindowsLatin1),
                compression: Some(String::new()),
                old_file_uid: Some(String::from("NONE")),
                new_file_uid: Some(String::from("NONE")),
            })
        );
    }

    #[test]
    fn from_properties__unrecognized_values__propagates_warnings() {
        let result = OfxHeader::from_properties(&properties(&[
            ("OFXHEADER", "999"),
            ("DATA", "ASDF1"),
            ("VERSION", "101"),
            ("SECURITY", "ASDF2"),
            ("ENCODING", "UTF-16"),
            ("CHARSET", "ASDF3"),
            ("COMPRESSION", ""),
            ("OLDFILEUID", "ASDF4"),
            ("NEWFILEUID", "ASDF5"),
        ]));

        assert_eq!(
            result,
            Warn {
                value: OfxHeader {
                    header_version: Some(999),
                    data: Some(OfxContentType::Unknown(String::from("ASDF1"))),
                    version: Some(101),
                    security: Some(OfxSecurity::Unknown(String::from("ASDF2"))),
                    encoding: Some(OfxEncoding::Unknown(String::from("UTF-16"))),
                    charset: Some(OfxCharset::Unknown(String::from("ASDF3"))),
                    compression: Some(String::new()),
                    old_file_uid: Some(String::from("ASDF4")),
                    new_file_uid: Some(String::from("ASDF5")),
                },
                warnings: vec![
                    OfxParseWarning::UnrecognizedOfxHeaderVersion(999),
                    OfxParseWarning::UnrecognizedContentType(String::from("ASDF1")),
                    OfxParseWarning::UnrecognizedVersion(101),
                    OfxParseWarning::UnrecognizedSecurityType(String::from("ASDF2")),
                    OfxParseWarning::UnrecognizedEncoding(String::from("UTF-16")),
                    OfxParseWarning::UnrecognizedCharset(String::from("ASDF3")),
                ],
            }
        );
    }

    #[test]
    fn from_properties__sparse_header__missing_and_invalid_warned() {
        let result = OfxHeader::from_properties(&properties(&[
            ("DATA", "OFXSGML"),
            ("VERSION", "abc"),
        ]));

        assert_eq!(
            result.value,
            OfxHeader {
                data: Some(OfxContentType::OfxSgml),
                ..OfxHeader::default()
            }
        );
        assert_eq!(
            result.warnings,
            vec![
                OfxParseWarning::MissingHeaderElement("OFXHEADER"),
                OfxParseWarning::InvalidHeaderNumber {
                    name: "VERSION",
                    value: String::from("abc"),
                },
                OfxParseWarning::MissingHeaderElement("SECURITY"),
                OfxParseWarning::MissingHeaderElement("ENCODING"),
                OfxParseWarning::MissingHeaderElement("CHARSET"),
                OfxParseWarning::MissingHeaderElement("COMPRESSION"),
                OfxParseWarning::MissingHeaderElement("OLDFILEUID"),
                OfxParseWarning::MissingHeaderElement("NEWFILEUID"),
            ]
        );
    }
}
