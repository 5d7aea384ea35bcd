use crate::parse::value::DEFAULT_DATE_FORMAT;

/// Settings applied when reading a document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOptions {
    /// The pattern dates are read with, in the `time` crate's format description syntax
    /// (e.g. `[day]/[month]/[year]`). With the default, `[year][month][day]`, values are read as
    /// OFX date-times and any time of day after the date is ignored; any other pattern has to
    /// match the whole value.
    pub date_format: String,
}

impl ParseOptions {
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            date_format: String::from(DEFAULT_DATE_FORMAT),
        }
    }
}
