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

use chrono::TimeZone;
use tracing::{debug, trace};

use crate::{
    parsers::{
        fields::date::parse_date_value,
        header::{find_date, find_sender, quote_from_lines, sender_token},
    },
    Clock, MboxWriter, Separator, MAILER_DAEMON,
};

impl<Tz: TimeZone, C: Clock> MboxWriter<Tz, C> {
    /// Converts an RFC 5322 message to an mboxrd entry.
    ///
    /// Returns `None` when the message is empty, or only whitespace when
    /// trimming is enabled.
    pub fn convert(&self, message: &str) -> Option<String> {
        if message.is_empty() {
            return None;
        }

        let message = if self.trim { message.trim() } else { message };
        if message.is_empty() {
            return None;
        }

        let separator = self.separator(message).to_string();
        let message = quote_from_lines(message);

        let mut entry = String::with_capacity(separator.len() + message.len() + 5);
        entry.push_str(&separator);
        entry.push('\n');
        entry.push_str(&message);
        if !message.ends_with(|ch| ch == '\r' || ch == '\n') {
            entry.push_str("\r\n");
        }
        entry.push_str("\r\n");

        Some(entry)
    }

    /// Builds the separator line for a message, as [`MboxWriter::convert`]
    /// would.
    ///
    /// The message is scanned as given, it is not trimmed.
    pub fn separator(&self, message: &str) -> Separator {
        let sender = find_sender(message)
            .map(sender_token)
            .unwrap_or_else(|| MAILER_DAEMON.to_string());

        let date = find_date(message);
        let timestamp = match date.and_then(|date| parse_date_value(date, &self.tz)) {
            Some(date) => date.naive_local(),
            None => {
                match date {
                    Some(date) => debug!("cannot parse date {date:?}, using current time"),
                    None => debug!("message has no date, using current time"),
                }
                self.clock.now().with_timezone(&self.tz).naive_local()
            }
        };

        let separator = Separator { sender, timestamp };
        trace!("mbox separator: {separator}");

        separator
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    use crate::{MboxWriter, Separator, MAILER_DAEMON};

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2014, 8, 5, 19, 10, 35).unwrap()
    }

    #[test_log::test]
    fn convert_message() {
        let writer = MboxWriter::new()
            .with_timezone(offset(-7))
            .with_clock(fixed_clock);

        assert_eq!(
            writer
                .convert(concat!(
                    "Date: Wed, 8 Oct 2014 13:07:01 -0700\n",
                    "From: Foo <foo@gmail.com>\n",
                    "\n",
                    "From sea to shining sea\n",
                    ">From another shore\n",
                    "\n"
                ))
                .unwrap(),
            concat!(
                "From Foo_<foo@gmail.com> Wed Oct 08 13:07:01 2014\n",
                "Date: Wed, 8 Oct 2014 13:07:01 -0700\n",
                "From: Foo <foo@gmail.com>\n",
                "\n",
                ">From sea to shining sea\n",
                ">>From another shore\r\n\r\n",
            )
        );
    }

    #[test_log::test]
    fn convert_without_headers() {
        let writer = MboxWriter::new()
            .with_timezone(Utc)
            .with_clock(fixed_clock);

        assert_eq!(
            writer.convert("Hello world").unwrap(),
            "From MAILER-DAEMON Tue Aug 05 19:10:35 2014\nHello world\r\n\r\n"
        );

        // Unparseable and impossible dates fall back to the clock
        for date in ["Date: yesterday", "Date: 30 Feb 2014 10:00:00 +0000", "Date:"] {
            let separator = writer.separator(date);
            assert_eq!(separator.sender, MAILER_DAEMON);
            assert_eq!(separator.timestamp, fixed_clock().naive_utc(), "{date}");
        }
    }

    #[test]
    fn render_in_timezone() {
        let message = "Date: Fri, 08 Mar 2013 09:45:37 -0500\nFrom: LAH <theLAH@bar.com>\n\nHi!\n";

        for (hours, expected) in [
            (-8, "From LAH_<theLAH@bar.com> Fri Mar 08 06:45:37 2013"),
            (0, "From LAH_<theLAH@bar.com> Fri Mar 08 14:45:37 2013"),
            (10, "From LAH_<theLAH@bar.com> Sat Mar 09 00:45:37 2013"),
        ] {
            let writer = MboxWriter::new().with_timezone(offset(hours));
            assert_eq!(writer.separator(message).to_string(), expected);
        }

        let writer = MboxWriter::new().with_timezone(Utc);
        assert_eq!(
            writer.separator("Date: 2014-10-08T20:07:01Z\n").to_string(),
            "From MAILER-DAEMON Wed Oct 08 20:07:01 2014"
        );
    }

    #[test]
    fn render_zone_names_and_local_dates() {
        let writer = MboxWriter::new()
            .with_timezone(offset(-5))
            .with_clock(|| Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());

        for (date, expected) in [
            ("Fri, 08 Mar 2013 09:45:37 EST", "Fri Mar 08 09:45:37 2013"),
            ("Fri, 08 Mar 2013 09:45:37 PDT", "Fri Mar 08 11:45:37 2013"),
            ("Fri, 08 Mar 2013 09:45:37 GMT", "Fri Mar 08 04:45:37 2013"),
            ("Fri, 08 Mar 2013 09:45:37 UT", "Fri Mar 08 04:45:37 2013"),
            ("Fri, 08 Mar 2013 09:45:37", "Fri Mar 08 09:45:37 2013"),
            ("2013-03-08T09:45:37", "Fri Mar 08 09:45:37 2013"),
            ("2013-03-08", "Thu Mar 07 19:00:00 2013"),
            ("Fri, 08 Mar 2013 09:45", "Fri Dec 31 19:00:00 1999"),
        ] {
            assert_eq!(
                writer.separator(&format!("Date: {date}\n")).asctime(),
                expected,
                "{date}"
            );
        }
    }

    #[test]
    fn nothing_to_write() {
        let writer = MboxWriter::new();
        assert_eq!(writer.convert(""), None);
        assert_eq!(writer.convert(" \r\n\t\n"), None);

        let writer = MboxWriter::new().with_trim(false);
        assert_eq!(writer.convert(""), None);
        assert!(writer.convert(" \r\n\t\n").is_some());
    }

    #[test]
    fn terminators() {
        let writer = MboxWriter::new()
            .with_trim(false)
            .with_timezone(Utc)
            .with_clock(fixed_clock);
        let separator = "From MAILER-DAEMON Tue Aug 05 19:10:35 2014\n";

        for (input, body) in [
            ("Hi!", "Hi!\r\n\r\n"),
            ("Hi!\n", "Hi!\n\r\n"),
            ("Hi!\r\n", "Hi!\r\n\r\n"),
            ("Hi!\r", "Hi!\r\r\n"),
            ("\n\nHi!\n\n", "\n\nHi!\n\n\r\n"),
        ] {
            assert_eq!(
                writer.convert(input).unwrap(),
                format!("{separator}{body}"),
                "{}",
                input.escape_debug()
            );
        }

        let writer = writer.with_trim(true);
        for input in ["Hi!", "Hi!\n", "Hi!\r\n", "\n\nHi!\n\n", "  Hi!\t"] {
            assert_eq!(
                writer.convert(input).unwrap(),
                format!("{separator}Hi!\r\n\r\n"),
                "{}",
                input.escape_debug()
            );
        }
    }

    #[test]
    fn quoting_is_not_idempotent() {
        let writer = MboxWriter::new()
            .with_timezone(Utc)
            .with_clock(fixed_clock);

        let first = writer.convert("From: a@b.c\n\nFrom here\n>>From there").unwrap();
        assert_eq!(
            first,
            concat!(
                "From a@b.c Tue Aug 05 19:10:35 2014\n",
                "From: a@b.c\n\n>From here\n>>>From there\r\n\r\n"
            )
        );

        // The separator line of the first entry is taken as the sender and
        // quoted, every quoted line gains another level.
        let second = writer.convert(&first).unwrap();
        assert_eq!(
            second,
            concat!(
                "From a@b.c_Tue_Aug_05_19:10:35_2014 Tue Aug 05 19:10:35 2014\n",
                ">From a@b.c Tue Aug 05 19:10:35 2014\n",
                "From: a@b.c\n\n>>From here\n>>>>From there\r\n\r\n"
            )
        );
    }

    #[test]
    fn separator_parses_back() {
        let writer = MboxWriter::new().with_timezone(offset(2));
        let separator = writer.separator("Date: Tue, 1 Jul 2003 10:52:37 +0200\nFrom: x@y.z\n");

        assert_eq!(separator.to_string().parse::<Separator>().unwrap(), separator);
        assert_eq!(separator.asctime(), "Tue Jul 01 10:52:37 2003");
    }
}
