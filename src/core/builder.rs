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

use chrono::{Local, TimeZone};

use crate::{Clock, MboxWriter, SystemClock};

impl MboxWriter {
    /// Create a new mbox writer using the default settings.
    ///
    /// The default settings are:
    ///
    /// * Leading and trailing whitespace is trimmed from the message.
    /// * Separator timestamps are rendered in the local time zone.
    /// * The system clock provides the timestamp of messages without a valid `Date`.
    ///
    pub fn new() -> Self {
        Self {
            trim: true,
            tz: Local,
            clock: SystemClock,
        }
    }
}

impl Default for MboxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz, C> MboxWriter<Tz, C> {
    /// Trim leading and trailing whitespace from the message before
    /// converting it (enabled by default).
    ///
    /// When disabled, the message is written as-is: leading blank lines are
    /// kept and a message that already ends in a line break gets a single
    /// `\r\n` appended.
    ///
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Render separator timestamps in the given time zone.
    pub fn with_timezone<T: TimeZone>(self, tz: T) -> MboxWriter<T, C> {
        MboxWriter {
            trim: self.trim,
            tz,
            clock: self.clock,
        }
    }

    /// Read the current time from `clock` when a message has no usable `Date`.
    pub fn with_clock<K: Clock>(self, clock: K) -> MboxWriter<Tz, K> {
        MboxWriter {
            trim: self.trim,
            tz: self.tz,
            clock,
        }
    }
}
