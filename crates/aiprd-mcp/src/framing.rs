// AI PRD Builder - Model Context Protocol Server
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Line framing for the stdio transport.
//!
//! Hosts write one JSON object per line, but a single read may deliver half a
//! message or several at once. [`LineBuffer`] keeps the unfinished tail between
//! reads and hands back only complete lines.

/// Header prefix some hosts emit out of habit; it carries no payload here.
const HEADER_PREFIX: &str = "Content-Length";

/// Accumulates raw stdin bytes and splits them into message lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every complete, non-empty line in order.
    ///
    /// Bytes after the last `\n` stay buffered until a later chunk completes
    /// them. Lines are decoded only once complete, so a multi-byte character
    /// split across two reads is reassembled intact.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let Some(last_newline) = self.pending.iter().rposition(|&b| b == b'\n') else {
            return Vec::new();
        };
        let tail = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, tail);

        complete
            .split(|&b| b == b'\n')
            .filter_map(|raw| {
                let decoded = String::from_utf8_lossy(raw);
                let line = decoded.trim();
                if line.is_empty() || line.starts_with(HEADER_PREFIX) {
                    None
                } else {
                    Some(line.to_string())
                }
            })
            .collect()
    }

    /// Number of buffered bytes still waiting for a newline.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_complete_line() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.push(b"{\"a\":1}\n"), vec!["{\"a\":1}"]);
        assert_eq!(buffer.pending_len(), 0);
    }

    #[test]
    fn test_partial_line_is_retained() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(b"{\"method\":").is_empty());
        assert_eq!(buffer.pending_len(), 10);
        assert_eq!(buffer.push(b"\"ping\"}\n"), vec!["{\"method\":\"ping\"}"]);
        assert_eq!(buffer.pending_len(), 0);
    }

    #[test]
    fn test_multiple_lines_in_one_chunk() {
        let mut buffer = LineBuffer::new();
        let lines = buffer.push(b"one\ntwo\nthr");
        assert_eq!(lines, vec!["one", "two"]);
        assert_eq!(buffer.push(b"ee\n"), vec!["three"]);
    }

    #[test]
    fn test_blank_and_header_lines_dropped() {
        let mut buffer = LineBuffer::new();
        let lines = buffer.push(b"\r\n   \nContent-Length: 42\r\n{}\r\n");
        assert_eq!(lines, vec!["{}"]);
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let mut buffer = LineBuffer::new();
        let text = "{\"name\":\"caf\u{e9}\"}\n".as_bytes();
        let split = text.iter().position(|&b| b == 0xC3).unwrap() + 1;

        assert!(buffer.push(&text[..split]).is_empty());
        assert_eq!(buffer.push(&text[split..]), vec!["{\"name\":\"caf\u{e9}\"}"]);
    }
}
