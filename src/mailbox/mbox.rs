/*
 * Copyright Stalwart Labs Ltd. See the COPYING
 * file at the top-level directory of this distribution.
 *
 * Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
 * https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
 * <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
 * option. This file may not be copied, modified, or distributed
 * except according to those terms.
 */

use std::io::{BufRead, BufReader, Read};

use tracing::trace;

use crate::{Result, Separator};

/// Parses an Mbox mailbox from a `Read` stream, returning each message with
/// its separator line.
/// Reverses the >From quoting applied by [`crate::MboxWriter`], as defined in the [QMail mbox specification](http://qmail.org/qmail-manual-html/man5/mbox.html).
pub struct MessageIterator<T: Read> {
    reader: BufReader<T>,
    next_from: Option<Vec<u8>>,
}

/// Mbox message contents and separator line
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Message {
    from_line: String,
    contents: Vec<u8>,
}

impl<T> MessageIterator<T>
where
    T: Read,
{
    pub fn new(reader: T) -> MessageIterator<T> {
        MessageIterator {
            reader: BufReader::new(reader),
            next_from: None,
        }
    }
}

impl<T> Iterator for MessageIterator<T>
where
    T: Read,
{
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut message = Vec::with_capacity(1024);
        let mut message_line = Vec::with_capacity(80);
        let mut from_line = self.next_from.take();

        loop {
            message_line.clear();
            match self.reader.read_until(b'\n', &mut message_line) {
                Ok(0) => break,
                Ok(_) => (),
                Err(err) => {
                    return Some(Err(err.into()));
                }
            }

            if message_line.starts_with(b"From ") {
                if from_line.is_some() {
                    self.next_from = Some(message_line);
                    break;
                }
                from_line = Some(std::mem::take(&mut message_line));
            } else if from_line.is_some() {
                // A bare \r also starts a line
                for line in message_line.split_inclusive(|&ch| ch == b'\r') {
                    if is_quoted_from(line) {
                        message.extend_from_slice(&line[1..]);
                    } else {
                        message.extend_from_slice(line);
                    }
                }
            }
        }

        let from_line = from_line?;
        let from_line = String::from_utf8_lossy(&from_line[5..])
            .trim_end_matches(&['\r', '\n'][..])
            .to_string();
        trace!("read mbox message {from_line:?} ({} bytes)", message.len());

        Some(Ok(Message {
            from_line,
            contents: message,
        }))
    }
}

fn is_quoted_from(line: &[u8]) -> bool {
    line.first() == Some(&b'>')
        && line
            .iter()
            .skip_while(|&&ch| ch == b'>')
            .take(5)
            .eq(b"From ".iter())
}

impl Message {
    /// Returns the separator line, without the leading `From ` and the line
    /// break.
    pub fn from_line(&self) -> &str {
        &self.from_line
    }

    /// Parses the separator line.
    pub fn separator(&self) -> Result<Separator> {
        self.from_line.parse()
    }

    /// Returns the message contents, unquoted.
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Unwraps the message contents.
    pub fn unwrap_contents(self) -> Vec<u8> {
        self.contents
    }
}
