// Text-based STOMP frame parser.
//
// Header lines are taken raw: no backslash unescaping is applied.
use crate::command::Command;
use crate::error::FrameError;
use crate::frame::Frame;
use crate::header::{Header, Headers};

const SEGMENT_SEPARATOR: &str = "\n\n";
const NUL: char = '\0';

/// Parse one complete STOMP frame from `text`.
///
/// The text is split on the blank line (`LF LF`). The first segment holds
/// the command line followed by `key:value` header lines; the optional
/// second segment is the body, with a single trailing NUL removed. When
/// there is no second segment the body is absent.
///
/// Errors
/// - `EmptyFrame` when `text` is empty.
/// - `MalformedFrame` when more than one blank-line separator is present.
/// - `MissingCommand` when the first segment has no non-empty line.
/// - `UnrecognizedCommand` when the first line is not a STOMP command.
pub fn parse_frame(text: &str) -> Result<Frame, FrameError> {
    if text.is_empty() {
        return Err(FrameError::EmptyFrame);
    }

    let segments: Vec<&str> = text.split(SEGMENT_SEPARATOR).collect();
    if segments.len() > 2 {
        return Err(FrameError::MalformedFrame {
            segments: segments.len(),
        });
    }
    let head = segments.first().ok_or(FrameError::EmptyFrame)?;

    let mut lines = head.split('\n').filter(|line| !line.is_empty());
    let command: Command = lines.next().ok_or(FrameError::MissingCommand)?.parse()?;
    let headers: Headers = lines.map(parse_header_line).collect();

    let body = segments
        .get(1)
        .copied()
        .map(|body| body.strip_suffix(NUL).unwrap_or(body).to_string());

    Ok(Frame::from_parts(command, headers, body))
}

/// Split a header line on its first colon. A line without a colon becomes
/// a header with that key and an empty value.
fn parse_header_line(line: &str) -> Header {
    match line.split_once(':') {
        Some((key, value)) => Header::from_wire(key, value),
        None => Header::from_wire(line, ""),
    }
}
