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

//! # mail-mboxify
//!
//! _mail-mboxify_ converts a single Internet Message Format (_RFC 5322_, formerly _RFC 2822_) e-mail
//! message into an **mboxrd** entry that can be appended verbatim to an mbox mailbox file.
//!
//! The conversion is a pure function of the message, a clock and a time zone:
//!
//! - An envelope line `From <sender> <Www Mmm dd hh:mm:ss yyyy>` is synthesized from the first line
//!   starting with `From` and the first line starting with `Date`. Whitespace in the sender is replaced
//!   with `_`, a missing sender becomes `MAILER-DAEMON` and a missing or unparseable date falls back to
//!   the current time.
//! - Every line matching `^>*From ` gets one more `>` prepended, following the
//!   [mboxrd](https://web.archive.org/web/20080706014011/http://homepages.tesco.net/~J.deBoynePollard/FGA/mail-mbox-formats.html)
//!   quoting rules. Quoting is not idempotent: converting a converted message quotes those lines again.
//! - The entry is terminated with a blank `\r\n` line.
//!
//! The [`mailbox::mbox::MessageIterator`] reader undoes this transformation when reading mbox streams.
//!
//! ## Usage Example
//!
//! ```
//!    use chrono::FixedOffset;
//!    use mail_mboxify::*;
//!
//!    let input = concat!(
//!        "From: Art Vandelay <art@vandelay.com>\n",
//!        "Date: Sat, 20 Nov 2021 14:22:01 -0800\n",
//!        "Subject: Importing\n\n",
//!        "From the desk of Art Vandelay\n",
//!    );
//!
//!    let writer = MboxWriter::new().with_timezone(FixedOffset::west_opt(8 * 3600).unwrap());
//!
//!    assert_eq!(
//!        writer.convert(input).unwrap(),
//!        concat!(
//!            "From Art_Vandelay_<art@vandelay.com> Sat Nov 20 14:22:01 2021\n",
//!            "From: Art Vandelay <art@vandelay.com>\n",
//!            "Date: Sat, 20 Nov 2021 14:22:01 -0800\n",
//!            "Subject: Importing\n\n",
//!            ">From the desk of Art Vandelay\r\n\r\n",
//!        )
//!    );
//!
//!    // Nothing to write
//!    assert_eq!(mboxify(None), None);
//!    assert_eq!(mboxify(Some("")), None);
//! ```

mod core;
pub mod mailbox;
pub mod parsers;

use chrono::{Local, NaiveDateTime, Utc};

/// Envelope sender used when the message has no `From` line.
pub const MAILER_DAEMON: &str = "MAILER-DAEMON";

/// `strftime` format of the timestamp in a separator line.
pub const SEPARATOR_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// Converts RFC 5322 messages to mboxrd entries.
///
/// Created with [`MboxWriter::new`] and configured with the `with_*` builder
/// methods. By default the writer trims surrounding whitespace from the
/// message, renders separator timestamps in the local time zone and reads the
/// system clock when a message carries no usable `Date`.
#[derive(Debug, Clone)]
pub struct MboxWriter<Tz = Local, C = SystemClock> {
    pub(crate) trim: bool,
    pub(crate) tz: Tz,
    pub(crate) clock: C,
}

/// The `From ` line that starts an entry in an mbox mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Separator {
    /// Envelope sender, without whitespace.
    pub sender: String,
    /// Delivery time, in the writer's time zone.
    pub timestamp: NaiveDateTime,
}

/// Source of the current time, read when a message has no usable `Date`.
///
/// Implemented by [`SystemClock`] and by any `Fn() -> DateTime<Utc>`.
pub trait Clock {
    fn now(&self) -> chrono::DateTime<Utc>;
}

/// Wall clock of the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SystemClock;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read mbox stream")]
    Io(#[from] std::io::Error),
    #[error("invalid mbox separator line {0:?}")]
    InvalidSeparator(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Converts a message to an mboxrd entry using the default [`MboxWriter`].
///
/// Returns `None` when there is nothing to write, that is when the message
/// is absent, empty or only whitespace.
pub fn mboxify(message: Option<&str>) -> Option<String> {
    MboxWriter::new().convert(message?)
}
