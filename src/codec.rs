//! Field codecs for the acknowledgment wire format.
//!
//! Booleans are strict single bytes: `0x00` false, `0x01` true, anything else
//! is a decode error. Optional strings are a presence flag (same encoding)
//! followed, when present, by a big-endian `u16` byte length and that many
//! UTF-8 bytes.

use crate::error::{Result, WireError};

/// Longest string payload the wire can carry (`u16` length prefix).
pub const MAX_STR_LEN: usize = u16::MAX as usize;

// ---------------------------------------------------------------------------
// Write helpers
// ---------------------------------------------------------------------------

/// Write a strict single-byte boolean.
pub fn write_bool(buf: &mut Vec<u8>, val: bool) {
    buf.push(u8::from(val));
}

/// Write an optional string: presence flag, then length-prefixed UTF-8 bytes.
///
/// Checks the length limit before touching `buf`, so a failed write leaves
/// the buffer untouched.
pub fn write_opt_str(buf: &mut Vec<u8>, field: &'static str, val: Option<&str>) -> Result<()> {
    let Some(s) = val else {
        write_bool(buf, false);
        return Ok(());
    };
    if s.len() > MAX_STR_LEN {
        return Err(WireError::StringTooLong {
            field,
            len: s.len(),
            max: MAX_STR_LEN,
        });
    }
    write_bool(buf, true);
    buf.extend_from_slice(&(s.len() as u16).to_be_bytes());
    buf.extend_from_slice(s.as_bytes());
    Ok(())
}

// ---------------------------------------------------------------------------
// Read cursor
// ---------------------------------------------------------------------------

/// Bounds-checked cursor over a message payload.
///
/// Field reads advance the cursor; [`WireReader::finish`] rejects payloads
/// with unread trailing bytes.
pub struct WireReader<'a> {
    message: &'static str,
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(message: &'static str, data: &'a [u8]) -> Self {
        Self { message, data, pos: 0 }
    }

    /// Read a strict single-byte boolean.
    pub fn read_bool(&mut self, field: &'static str) -> Result<bool> {
        let offset = self.pos;
        let byte = self.take(field, 1)?[0];
        match byte {
            0x00 => Ok(false),
            0x01 => Ok(true),
            got => Err(WireError::InvalidBool { field, offset, got }),
        }
    }

    /// Read an optional string written by [`write_opt_str`].
    pub fn read_opt_str(&mut self, field: &'static str) -> Result<Option<String>> {
        if !self.read_bool(field)? {
            return Ok(None);
        }
        let len_bytes = self.take(field, 2)?;
        let len = u16::from_be_bytes([len_bytes[0], len_bytes[1]]) as usize;
        let payload = self.take(field, len)?;
        String::from_utf8(payload.to_vec())
            .map(Some)
            .map_err(|source| WireError::InvalidUtf8 { field, source })
    }

    /// Assert the whole payload was consumed.
    pub fn finish(self) -> Result<()> {
        let left = self.data.len() - self.pos;
        if left > 0 {
            return Err(WireError::TrailingBytes {
                message: self.message,
                left,
                total: self.data.len(),
            });
        }
        Ok(())
    }

    fn take(&mut self, field: &'static str, need: usize) -> Result<&'a [u8]> {
        if self.data.len() - self.pos < need {
            return Err(WireError::too_short(field, self.pos + need, self.data.len()));
        }
        let slice = &self.data[self.pos..self.pos + need];
        self.pos += need;
        Ok(slice)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
