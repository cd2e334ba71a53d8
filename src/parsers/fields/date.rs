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

use std::fmt;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::parsers::message_stream::MessageStream;

/// Date and time as written in an RFC 5322 `Date` field, before any
/// calendar validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub tz_hour: u32,
    pub tz_minute: u32,
    pub tz_before_gmt: bool,
    /// `false` when the value carries neither an offset nor a zone name, the
    /// time is then local to the reader.
    pub has_zone: bool,
}

impl DateTime {
    pub fn to_iso8601(&self) -> String {
        if !self.has_zone {
            return format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            );
        }

        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:{:02}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            if self.tz_before_gmt { "-" } else { "+" },
            self.tz_hour,
            self.tz_minute
        )
    }

    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year as i32, self.month, self.day)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }

    /// Returns the instant this date refers to, or `None` when the fields do
    /// not describe a real calendar date (month 0, February 30th, a zone
    /// offset of a day or more, etc.) or when no zone was given.
    pub fn to_chrono(&self) -> Option<chrono::DateTime<FixedOffset>> {
        if !self.has_zone {
            return None;
        }

        let offset = (self.tz_hour * 3600 + self.tz_minute * 60) as i32;
        let offset = FixedOffset::east_opt(if self.tz_before_gmt {
            -offset
        } else {
            offset
        })?;
        offset.from_local_datetime(&self.to_naive()?).single()
    }

    /// Returns this date in `tz`. Dates without a zone are taken as local
    /// time in `tz`.
    pub fn to_timezone<Tz: TimeZone>(&self, tz: &Tz) -> Option<chrono::DateTime<Tz>> {
        if self.has_zone {
            Some(self.to_chrono()?.with_timezone(tz))
        } else {
            tz.from_local_datetime(&self.to_naive()?).earliest()
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&self.to_iso8601())
    }
}

/// Parses the value of a `Date` header and returns it in `tz`.
///
/// RFC 3339 timestamps are accepted as-is, a bare `YYYY-MM-DD` is midnight
/// UTC and `YYYY-MM-DDThh:mm:ss` is local time in `tz`. Anything else goes
/// through the lenient RFC 5322 parser.
pub fn parse_date_value<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<chrono::DateTime<Tz>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = chrono::DateTime::parse_from_rfc3339(value) {
        Some(date.with_timezone(tz))
    } else if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?).with_timezone(tz))
    } else if let Ok(date) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        tz.from_local_datetime(&date).earliest()
    } else {
        parse_date(&MessageStream::new(value.as_bytes()), false)?.to_timezone(tz)
    }
}

pub fn parse_date(stream: &MessageStream, abort_on_invalid: bool) -> Option<DateTime> {
    let mut pos = 0;
    let mut parts: [u32; 7] = [0; 7];
    let mut parts_sizes: [u32; 7] = [
        2, // Day (0)
        2, // Month (1)
        4, // Year (2)
        2, // Hour (3)
        2, // Minute (4)
        2, // Second (5)
        4, // TZ (6)
    ];
    let mut month: [u8; 3] = [0; 3];
    let mut month_pos: usize = 0;
    let mut zone: [u8; 3] = [0; 3];
    let mut zone_pos: usize = 0;

    let mut is_plus = true;
    let mut is_signed = false;
    let mut is_new_token = true;
    let mut ignore = true;
    let mut comment_count = 0;

    while let Some(&ch) = stream.next() {
        let mut next_part = false;

        match ch {
            b'\n' => match stream.peek() {
                Some(b' ' | b'\t') => {
                    stream.advance(1);
                    if !is_new_token && !ignore {
                        next_part = true;
                    } else {
                        continue;
                    }
                }
                _ => break,
            },
            _ if comment_count > 0 => {
                if ch == b')' {
                    comment_count -= 1;
                } else if ch == b'(' {
                    comment_count += 1;
                }
            }
            b'0'..=b'9' => {
                if pos < 7 && parts_sizes[pos] > 0 {
                    parts_sizes[pos] -= 1;
                    parts[pos] += (ch - b'0') as u32 * u32::pow(10, parts_sizes[pos]);

                    if ignore {
                        ignore = false;
                    }
                }
                if is_new_token {
                    is_new_token = false;
                }
            }
            b':' => {
                if !is_new_token && !ignore && (pos == 3 || pos == 4) {
                    next_part = true;
                }
            }
            b'+' => {
                is_signed = true;
                pos = 6;
            }
            b'-' => {
                is_plus = false;
                is_signed = true;
                pos = 6;
            }
            b' ' | b'\t' => {
                if !is_new_token && !ignore {
                    next_part = true;
                }
            }
            b'a'..=b'z' | b'A'..=b'Z' => {
                if pos == 1 && month_pos < 3 {
                    month[month_pos] = ch.to_ascii_lowercase();
                    month_pos += 1;
                } else if pos == 5 && is_new_token && parts_sizes[5] == 2 {
                    // hh:mm followed by a zone name
                    pos = 6;
                }
                if pos == 6 && !is_signed && parts_sizes[6] == 4 {
                    if zone_pos < 3 {
                        zone[zone_pos] = ch.to_ascii_lowercase();
                    }
                    zone_pos += 1;
                }
                if is_new_token {
                    is_new_token = false;
                }
            }
            b'(' => {
                comment_count += 1;
                is_new_token = true;
            }
            b',' | b'\r' => (),
            _ => {
                if abort_on_invalid {
                    stream.rewind(1);
                    break;
                }
            }
        }

        if next_part {
            if pos < 7 && parts_sizes[pos] > 0 {
                parts[pos] /= u32::pow(10, parts_sizes[pos]);
            }
            pos += 1;
            is_new_token = true;
        }
    }

    if pos == 5 && parts_sizes[5] < 2 {
        // Seconds at the end of the value, no zone
        parts[5] /= u32::pow(10, parts_sizes[5]);
    } else if pos < 6 {
        return None;
    }

    if !is_signed && zone_pos > 0 {
        let name = if zone_pos <= 3 { &zone[..zone_pos] } else { &zone[..0] };
        let (offset, before_gmt) = match name {
            b"est" => (500, true),
            b"edt" => (400, true),
            b"cst" => (600, true),
            b"cdt" => (500, true),
            b"mst" => (700, true),
            b"mdt" => (600, true),
            b"pst" => (800, true),
            b"pdt" => (700, true),
            _ => (0, false),
        };
        parts[6] = offset;
        is_plus = !before_gmt;
    }

    if month_pos == 3 {
        parts[1] = match &month {
            b"jan" => 1,
            b"feb" => 2,
            b"mar" => 3,
            b"apr" => 4,
            b"may" => 5,
            b"jun" => 6,
            b"jul" => 7,
            b"aug" => 8,
            b"sep" => 9,
            b"oct" => 10,
            b"nov" => 11,
            b"dec" => 12,
            _ => 0,
        }
    }

    if (1..=99).contains(&parts[2]) {
        parts[2] += 1900;
    }

    Some(DateTime {
        year: parts[2],
        month: parts[1],
        day: parts[0],
        hour: parts[3],
        minute: parts[4],
        second: parts[5],
        tz_hour: parts[6] / 100,
        tz_minute: parts[6] % 100,
        tz_before_gmt: !is_plus,
        has_zone: is_signed || zone_pos > 0 || parts_sizes[6] < 4,
    })
}
