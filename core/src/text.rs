//! Reading and writing sequences of numbers as plain text.
//!
//! The plain text format is a list of decimal numbers separated by whitespace and/or commas,
//! spread over any number of lines. Lines starting with `#` are ignored.

use std::{fmt, io, num::ParseFloatError, str::FromStr};

/// The line comment marker.
pub const COMMENT: char = '#';

/// Parses a sequence of numbers in the plain text format.
///
/// # Examples
///
/// ```
/// use lazyview_core::text::parse_values;
///
/// let values = parse_values("# header\n1 2.5,3\n-4\n").unwrap();
///
/// assert_eq!(values, vec![1.0, 2.5, 3.0, -4.0]);
/// ```
pub fn parse_values(s: &str) -> Result<Vec<f64>, ParseValuesError> {
    s.lines()
        .filter(|line| !line.trim_start().starts_with(COMMENT))
        .flat_map(|line| line.split(|c: char| c.is_ascii_whitespace() || c == ','))
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| {
            f64::from_str(token).map_err(|source| ParseValuesError {
                position: i + 1,
                token: token.to_string(),
                source,
            })
        })
        .collect()
}

/// Writes a sequence of numbers in the plain text format.
///
/// Values are written with `precision` decimals and separated by `delimiter`, followed by a
/// single newline.
pub fn write_values<W, I>(
    writer: &mut W,
    values: I,
    delimiter: &str,
    precision: usize,
) -> io::Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = f64>,
{
    for (i, x) in values.into_iter().enumerate() {
        if i > 0 {
            writer.write_all(delimiter.as_bytes())?;
        }
        write!(writer, "{x:.precision$}")?;
    }

    writeln!(writer)
}

/// An error associated with parsing the plain text format.
#[derive(Debug)]
pub struct ParseValuesError {
    position: usize,
    token: String,
    source: ParseFloatError,
}

impl ParseValuesError {
    /// Returns the 1-based position of the offending value in the sequence.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the offending token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for ParseValuesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ParseValuesError {
            position, token, ..
        } = self;
        write!(f, "failed to parse '{token}' as number (value {position})")
    }
}

impl std::error::Error for ParseValuesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl From<ParseValuesError> for io::Error {
    fn from(e: ParseValuesError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}
