//! Speed parameter extraction
//!
//! Requests are not parsed as HTTP. The text of a single read is searched for
//! the control marker and the value after it is taken up to the next
//! whitespace, so `GET /set?valor=-40 HTTP/1.1` yields `-40`. Everything else
//! in the request is ignored.

/// Marker preceding the speed value in the request target.
pub const SPEED_MARKER: &str = "/set?valor=";

/// Why a speed value following [`SPEED_MARKER`] was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing follows the marker.
    Empty,
    /// The value is not a signed 32-bit integer.
    Invalid,
}

/// Decode the raw request bytes.
///
/// Text after the first invalid UTF-8 sequence is dropped; a multi-byte
/// character cut at the end of the read buffer ends up there.
pub fn request_text(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}

/// Find the speed parameter in a request.
///
/// Returns `None` when the request carries no marker at all. Only the first
/// occurrence of the marker is considered.
pub fn parse_speed(request: &str) -> Option<Result<i32, ParseError>> {
    let start = request.find(SPEED_MARKER)? + SPEED_MARKER.len();
    let rest = &request[start..];
    let value = rest.split(char::is_whitespace).next().unwrap_or(rest);

    Some(parse_value(value))
}

fn parse_value(value: &str) -> Result<i32, ParseError> {
    if value.is_empty() {
        return Err(ParseError::Empty);
    }
    value.parse::<i32>().map_err(|_| ParseError::Invalid)
}
