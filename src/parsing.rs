//! # Parsing Utilities
//!
//! Small combinators shared by the framing and field decoders.

use nom::{
    Err, Input, Mode, OutputMode, PResult, Parser,
    error::{ErrorKind, ParseError},
};

use crate::error::FieldError;

/// Ensures that the parser consumes all of its input.
///
/// A field slice is decoded all-or-nothing: trailing characters after a
/// successful parse (`"12.5x"`) are an error, not a remainder.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::parsing::consumed;
/// use nom::{IResult, Parser, bytes::complete::take, error::ErrorKind};
///
/// let mut parser = consumed(take(3u8), ErrorKind::Eof);
/// let result: IResult<_, _> = parser.parse("abc");
/// assert!(result.is_ok());
///
/// let result: IResult<_, _> = parser.parse("abcd");
/// assert!(result.is_err());
/// ```
pub fn consumed<I, E: ParseError<I>, F>(
    f: F,
    e: ErrorKind,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    Consumed { f, e }
}

struct Consumed<F> {
    f: F,
    e: ErrorKind,
}

impl<I, F> Parser<I> for Consumed<F>
where
    I: Input,
    F: Parser<I>,
{
    type Output = <F as Parser<I>>::Output;
    type Error = <F as Parser<I>>::Error;

    fn process<OM: OutputMode>(&mut self, i: I) -> PResult<OM, I, Self::Output, Self::Error> {
        let (i, o) = self.f.process::<OM>(i)?;

        if i.input_len() != 0 {
            return Err(Err::Error(OM::Error::bind(|| {
                <F as Parser<I>>::Error::from_error_kind(i, self.e)
            })));
        }

        Ok((i, o))
    }
}

/// Runs `parser` over a whole field value.
///
/// Any nom failure, including leftover input, becomes [`FieldError::Malformed`].
/// Emptiness is the caller's concern: decoders check for it first so an empty
/// field reports [`FieldError::Missing`] instead.
pub(crate) fn decode_with<'a, O, F>(value: &'a str, parser: F) -> Result<O, FieldError>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    consumed(parser, ErrorKind::Eof)
        .parse(value)
        .map(|(_, output)| output)
        .map_err(|_| FieldError::Malformed)
}
