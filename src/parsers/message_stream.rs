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

use std::cell::Cell;

/// Byte cursor over a header value.
///
/// The read position lives in a `Cell` so field parsers can walk the stream
/// through a shared reference.
pub struct MessageStream<'x> {
    data: &'x [u8],
    pos: Cell<usize>,
}

impl<'x> MessageStream<'x> {
    pub fn new(data: &'x [u8]) -> MessageStream<'x> {
        MessageStream {
            data,
            pos: Cell::new(0),
        }
    }

    #[inline(always)]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Option<&'x u8> {
        let pos = self.pos.get();
        let ch = self.data.get(pos)?;
        self.pos.set(pos + 1);
        Some(ch)
    }

    #[inline(always)]
    pub fn peek(&self) -> Option<&'x u8> {
        self.data.get(self.pos.get())
    }

    #[inline(always)]
    pub fn advance(&self, n: usize) {
        self.pos.set(std::cmp::min(self.pos.get() + n, self.data.len()));
    }

    #[inline(always)]
    pub fn rewind(&self, n: usize) {
        self.pos.set(self.pos.get().saturating_sub(n));
    }
}

#[cfg(test)]
mod tests {
    use super::MessageStream;

    #[test]
    fn stream_navigation() {
        let stream = MessageStream::new(b"ab\n c");

        assert_eq!(stream.next(), Some(&b'a'));
        assert_eq!(stream.peek(), Some(&b'b'));

        stream.advance(2);
        assert_eq!(stream.next(), Some(&b' '));

        stream.rewind(10);
        assert_eq!(stream.next(), Some(&b'a'));

        stream.advance(100);
        assert_eq!(stream.peek(), None);
        assert_eq!(stream.next(), None);
    }
}
