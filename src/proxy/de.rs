use super::model::*;
use err_derive::Error;
use nom::{
    bytes::streaming::take,
    combinator::map_res,
    error::{context, ContextError, ErrorKind, ParseError, VerboseErrorKind},
    multi::count,
    number::streaming::{be_i32, be_u32},
};

type IResult<I, O, E = nom::error::VerboseError<I>> = Result<(I, O), nom::Err<E>>;

// Context attached to the UTF-8 check of the error message so that this
// failure can be told apart from other malformed input
const INVALID_UTF8_CONTEXT: &str = "CR: Error message is not valid UTF-8";

/// The error types used during deserialisation
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// The buffer ended before the next field was complete
    #[error(display = "Buffer truncated mid field")]
    TruncatedBuffer,
    /// The error message bytes are not valid UTF-8
    #[error(display = "Error message is not valid UTF-8")]
    InvalidUtf8,
    /// A Nom parsing error usually a malformed packet
    #[error(display = "Parsing error: {}", _0)]
    NomError(String),
}
type NomErrorType<'a> = nom::error::VerboseError<&'a [u8]>;

impl<'a> From<nom::Err<NomErrorType<'a>>> for Error {
    fn from(k: nom::Err<NomErrorType<'a>>) -> Self {
        match k {
            nom::Err::Incomplete(_) => Error::TruncatedBuffer,
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                if e.errors.iter().any(|(_, kind)| {
                    matches!(kind, VerboseErrorKind::Context(ctx) if *ctx == INVALID_UTF8_CONTEXT)
                }) {
                    Error::InvalidUtf8
                } else {
                    Error::NomError(format!("Nom Error: {:x?}", e))
                }
            }
        }
    }
}

fn make_error<I, E: ParseError<I>>(input: I, ctx: &'static str, kind: ErrorKind) -> E
where
    I: std::marker::Copy,
    E: ContextError<I>,
{
    E::add_context(input, ctx, E::from_error_kind(input, kind))
}

impl Event {
    /// Deserialize one complete event from a received message
    ///
    /// The transport delivers whole messages, so a buffer that ends mid
    /// field is malformed and fails with [`Error::TruncatedBuffer`]
    pub fn deserialize(buf: &[u8]) -> Result<Event, Error> {
        // Throw away the nom-specific return types
        let (_, event) = event(buf)?;
        Ok(event)
    }
}

pub(crate) fn event(buf: &[u8]) -> IResult<&[u8], Event> {
    let (buf, wire_id) = context("Missing event id", be_u32)(buf)?;

    if wire_id == EVENT_COOKIE_REPORT - 1 {
        let (buf, payload) = cookie_report(buf)?;
        Ok((buf, Event::CookieReport(payload)))
    } else {
        // An unknown payload cannot be decoded but must still be a typed
        // outcome rather than a parse failure
        Ok((buf, Event::Unrecognized { wire_id }))
    }
}

fn cookie_report(buf: &[u8]) -> IResult<&[u8], CookieReport> {
    let (buf, cookie) = context("CR: Missing cookie", be_u32)(buf)?;
    let (buf, for_cookie) = context("CR: Missing for_cookie", be_u32)(buf)?;
    let (buf, error_code) = context("CR: Missing error code", be_u32)(buf)?;
    // The message length is the one signed field of the format
    let (buf, message_len) = context("CR: Missing message length", be_i32)(buf)?;
    let (buf, error_message) = if message_len > 0 {
        let (buf, message) = context(
            INVALID_UTF8_CONTEXT,
            map_res(take(message_len as usize), std::str::from_utf8),
        )(buf)?;
        (buf, message.to_string())
    } else {
        // A non positive length means no message bytes are on the wire
        (buf, String::new())
    };
    let (buf, channel_id) = context("CR: Missing channel id", be_u32)(buf)?;
    let (buf, local_port) = context("CR: Missing local port", be_u32)(buf)?;
    let (buf, channel_id_count) = context("CR: Missing channel id count", be_u32)(buf)?;
    // The count comes off the wire unchecked. Bound it by the remaining
    // buffer before allocating the list
    if (channel_id_count as usize).saturating_mul(4) > buf.len() {
        return Err(nom::Err::Failure(make_error(
            buf,
            "CR: Channel id count exceeds remaining buffer",
            ErrorKind::TooLarge,
        )));
    }
    let (buf, channel_ids) = count(be_u32, channel_id_count as usize)(buf)?;

    Ok((
        buf,
        CookieReport {
            cookie,
            for_cookie,
            error_code,
            error_message,
            channel_id,
            local_port,
            channel_ids,
        },
    ))
}
