use bytes::{Buf, BufMut, BytesMut};
use std::io;
use tokio_util::codec::{Decoder, Encoder};

use crate::frame::Frame;

/// Render `frame` in STOMP wire format:
/// `COMMAND LF (key:value LF)* [LF body] LF NUL`.
///
/// Headers are written raw, in the (unspecified) iteration order of the
/// frame's header set. No escaping is applied.
pub fn serialize_frame(frame: &Frame) -> String {
    let mut out = String::new();
    out.push_str(frame.command().as_str());
    out.push('\n');
    for h in frame.headers() {
        out.push_str(h.key());
        out.push(':');
        out.push_str(h.value());
        out.push('\n');
    }
    if let Some(body) = frame.body_text() {
        out.push('\n');
        out.push_str(body);
    }
    out.push('\n');
    out.push('\0');
    out
}

/// Items produced by `StompCodec` when reading a byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StompItem {
    /// One NUL-terminated frame as text, terminator included.
    Text(String),
    /// A broker heart-beat (LF or CR LF between frames).
    Heartbeat,
}

/// `StompCodec` implements `tokio_util::codec::{Decoder, Encoder}` to carry
/// STOMP text over a byte-stream transport such as TCP.
///
/// Decoding cuts the stream at each NUL and hands the text (NUL included)
/// to the caller; parsing into a `Frame` happens in the session. Encoding
/// writes outbound text verbatim.
#[derive(Debug, Default)]
pub struct StompCodec {}

impl StompCodec {
    pub fn new() -> Self {
        Self {}
    }
}

impl Decoder for StompCodec {
    type Item = StompItem;
    type Error = io::Error;

    /// Returns `Ok(None)` (leaving `src` untouched) until a full heart-beat
    /// or NUL-terminated frame is buffered.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match src.chunk() {
            [b'\n', ..] => {
                src.advance(1);
                return Ok(Some(StompItem::Heartbeat));
            }
            [b'\r', b'\n', ..] => {
                src.advance(2);
                return Ok(Some(StompItem::Heartbeat));
            }
            [b'\r'] => return Ok(None),
            _ => {}
        }

        let Some(nul) = src.iter().position(|&b| b == 0) else {
            return Ok(None);
        };
        let raw = src.split_to(nul + 1);
        let text = String::from_utf8(raw.to_vec()).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid utf8 in frame: {}", e),
            )
        })?;
        Ok(Some(StompItem::Text(text)))
    }
}

impl Encoder<String> for StompCodec {
    type Error = io::Error;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len());
        dst.put_slice(item.as_bytes());
        Ok(())
    }
}
