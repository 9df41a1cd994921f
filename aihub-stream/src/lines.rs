//! Incremental UTF-8 decoding and line splitting.
//!
//! Network chunk boundaries are arbitrary: a single multi-byte character or a
//! single line can be split across two reads. The assembler therefore decodes
//! through a stateful carry buffer — never one chunk at a time — and retains
//! any unterminated trailing line between calls.

/// Splits a byte stream into complete text lines across chunk boundaries.
///
/// Owned exclusively by one session; never shared.
#[derive(Debug, Default)]
pub struct LineAssembler {
    /// Incomplete trailing UTF-8 sequence from the previous chunk.
    carry: Vec<u8>,
    /// Decoded text not yet terminated by a newline.
    pending: String,
}

impl LineAssembler {
    /// Create an empty assembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return the complete lines it finishes, in order.
    ///
    /// A trailing `\r` is stripped from each line. Text after the last
    /// newline is retained and prefixed to the next feed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.find('\n') {
            let line = self.pending[..pos].trim_end_matches('\r').to_string();
            self.pending.drain(..=pos);
            lines.push(line);
        }
        lines
    }

    /// Flush the unterminated remainder as a final line at end-of-stream.
    ///
    /// A multi-byte sequence truncated by the end of the transport decodes
    /// lossily (replacement character) rather than being dropped.
    pub fn finish(&mut self) -> Option<String> {
        if !self.carry.is_empty() {
            let tail = std::mem::take(&mut self.carry);
            self.pending.push_str(&String::from_utf8_lossy(&tail));
        }
        if self.pending.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.pending))
        }
    }

    /// Decode `chunk` through the carry buffer, appending the longest valid
    /// UTF-8 prefix to `pending` and retaining an incomplete trailing
    /// sequence for the next call.
    fn decode(&mut self, chunk: &[u8]) {
        self.carry.extend_from_slice(chunk);
        let bytes = std::mem::take(&mut self.carry);
        let mut rest = bytes.as_slice();

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.pending.push_str(text);
                    rest = &[];
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    self.pending
                        .push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match err.error_len() {
                        // Genuinely invalid bytes: substitute and keep going.
                        Some(len) => {
                            self.pending.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        // Incomplete trailing sequence: wait for more bytes.
                        None => {
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }

        self.carry = rest.to_vec();
    }
}
