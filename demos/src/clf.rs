// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Decoder for access-log lines in Common Log Format.
//!
//! ```text
//! host - - [01/Aug/1995:00:54:59 -0400] "GET /images/opf-logo.gif HTTP/1.0" 200 32511
//! ```
//!
//! Only the request, status and size are kept. A size of `-` means no body
//! was sent and decodes as zero.

use std::io;
use std::io::BufRead;

use anyhow::Context;
use anyhow::bail;
use webtopk::event::AccessRecord;

/// Decodes one log line.
pub fn decode_line(line: &str) -> anyhow::Result<AccessRecord> {
    let (_, after_open) = line.split_once('[').context("missing timestamp")?;
    let (_, after_timestamp) = after_open
        .split_once(']')
        .context("unterminated timestamp")?;
    let (_, request_and_rest) = after_timestamp
        .split_once('"')
        .context("missing request line")?;
    let (request, trailer) = request_and_rest
        .rsplit_once('"')
        .context("unterminated request")?;

    let mut parts = request.split_whitespace();
    let method = parts.next().context("missing method")?;
    let path = parts.next().context("missing path")?;

    let mut fields = trailer.split_whitespace();
    let status = fields.next().context("missing status")?;
    let status = status
        .parse::<u16>()
        .with_context(|| format!("invalid status {status:?}"))?;
    let size = match fields.next() {
        Some("-") => 0,
        Some(size) => size
            .parse::<u64>()
            .with_context(|| format!("invalid size {size:?}"))?,
        None => bail!("missing size"),
    };

    Ok(AccessRecord::new(method, path, status, size))
}

/// Iterator over the decodable records of a log, one line at a time.
///
/// A line that is not UTF-8 or does not decode is logged, counted as skipped
/// and passed over. The first I/O error ends the iteration and is returned by
/// [`finish`](Self::finish).
///
/// # Examples
///
/// ```
/// # use demos::clf::LogRecords;
/// let log = &b"[t] \"GET /a HTTP/1.0\" 200 10\nnot a log line\n"[..];
/// let mut records = LogRecords::new(log);
/// assert_eq!(records.by_ref().count(), 1);
/// assert_eq!(records.finish().unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct LogRecords<R> {
    reader: R,
    line: Vec<u8>,
    skipped: usize,
    error: Option<io::Error>,
}

impl<R: BufRead> LogRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            skipped: 0,
            error: None,
        }
    }

    /// Returns the number of lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns the number of skipped lines, or the I/O error that stopped
    /// reading before the end of the log.
    pub fn finish(self) -> io::Result<usize> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.skipped),
        }
    }

    fn decode_current(&self) -> anyhow::Result<AccessRecord> {
        let line = std::str::from_utf8(&self.line).context("line is not valid UTF-8")?;
        decode_line(line.trim_end_matches(['\r', '\n']))
    }
}

impl<R: BufRead> Iterator for LogRecords<R> {
    type Item = AccessRecord;

    fn next(&mut self) -> Option<AccessRecord> {
        if self.error.is_some() {
            return None;
        }
        loop {
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => {
                    self.error = Some(err);
                    return None;
                }
            }
            match self.decode_current() {
                Ok(record) => return Some(record),
                Err(err) => {
                    self.skipped += 1;
                    let line = String::from_utf8_lossy(&self.line);
                    tracing::warn!("couldn't decode log line {:?}: {err:#}", line.trim_end());
                }
            }
        }
    }
}
