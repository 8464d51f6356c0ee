//! Input parsing for the driver using nom
//!
//! Integer syntax:
//! ```text
//! 0x1F00    hexadecimal (prefix required, case-insensitive)
//! 4096      decimal
//! -0x10     either form may carry a leading '-'
//! ```
//!
//! Trace line format:
//! ```text
//! <address> [data|auto]   # optional comment
//! ```

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit1, hex_digit1, space0, space1},
    combinator::{all_consuming, map, map_res, opt, value},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

/// Error produced when driver input cannot be understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was entered
    Empty,

    /// Input is not a valid integer or keyword
    Invalid(String),

    /// A trace file line failed to parse
    Line {
        /// 1-based line number
        line: usize,
        /// Underlying error
        source: Box<ParseError>,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "no input"),
            ParseError::Invalid(input) => write!(f, "cannot parse '{}'", input),
            ParseError::Line { line, source } => write!(f, "line {}: {}", line, source),
        }
    }
}

impl std::error::Error for ParseError {}

/// One access read from a trace file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceAccess {
    /// Address to access
    pub address: i64,
    /// Explicit data, or `None` to derive it
    pub data: Option<i64>,
}

fn hex_magnitude(input: &str) -> IResult<&str, i64> {
    map_res(preceded(tag_no_case("0x"), hex_digit1), |digits: &str| {
        i64::from_str_radix(digits, 16)
    })(input)
}

fn decimal_magnitude(input: &str) -> IResult<&str, i64> {
    map_res(digit1, |digits: &str| digits.parse::<i64>())(input)
}

/// Signed integer in hexadecimal or decimal notation
pub fn integer(input: &str) -> IResult<&str, i64> {
    map(
        pair(opt(char('-')), alt((hex_magnitude, decimal_magnitude))),
        |(sign, magnitude)| if sign.is_some() { -magnitude } else { magnitude },
    )(input)
}

/// Data token: an integer, or `auto` to derive the value from the address
pub fn data(input: &str) -> IResult<&str, Option<i64>> {
    alt((value(None, tag_no_case("auto")), map(integer, Some)))(input)
}

fn trace_access(input: &str) -> IResult<&str, TraceAccess> {
    map(
        tuple((integer, opt(preceded(space1, data)), space0)),
        |(address, data, _)| TraceAccess {
            address,
            data: data.flatten(),
        },
    )(input)
}

/// Parse a whole input line as an address
///
/// Bare digits are decimal; hexadecimal needs the `0x` prefix.
pub fn parse_address(input: &str) -> Result<i64, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    all_consuming(delimited(space0, integer, space0))(trimmed)
        .map(|(_, address)| address)
        .map_err(|_| ParseError::Invalid(trimmed.to_string()))
}

/// Parse a whole input line as data; blank means derive from the address
pub fn parse_data(input: &str) -> Result<Option<i64>, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    all_consuming(data)(trimmed)
        .map(|(_, data)| data)
        .map_err(|_| ParseError::Invalid(trimmed.to_string()))
}

/// Parse one trace line; comments and blank lines yield `None`
pub fn parse_trace_line(input: &str) -> Result<Option<TraceAccess>, ParseError> {
    let content = match input.find('#') {
        Some(pos) => &input[..pos],
        None => input,
    };
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    all_consuming(trace_access)(trimmed)
        .map(|(_, access)| Some(access))
        .map_err(|_| ParseError::Invalid(trimmed.to_string()))
}

/// Parse every line of a trace, reporting the first bad line
pub fn parse_trace(input: &str) -> Result<Vec<TraceAccess>, ParseError> {
    let mut accesses = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        match parse_trace_line(line) {
            Ok(Some(access)) => accesses.push(access),
            Ok(None) => {}
            Err(err) => {
                return Err(ParseError::Line {
                    line: idx + 1,
                    source: Box::new(err),
                })
            }
        }
    }
    Ok(accesses)
}
