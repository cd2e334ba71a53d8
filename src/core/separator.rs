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

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;

use crate::{Error, Separator, SEPARATOR_DATE_FORMAT};

impl Separator {
    pub fn new(sender: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Separator {
            sender: sender.into(),
            timestamp,
        }
    }

    /// Returns the timestamp as `Www Mmm dd hh:mm:ss yyyy`.
    pub fn asctime(&self) -> String {
        self.timestamp.format(SEPARATOR_DATE_FORMAT).to_string()
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "From {} {}",
            self.sender,
            self.timestamp.format(SEPARATOR_DATE_FORMAT)
        )
    }
}

/// Parses `[From ]<sender> <Www Mmm dd hh:mm:ss yyyy>`, with an optional
/// trailing line break.
impl FromStr for Separator {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let value = line.trim_end_matches(&['\r', '\n'][..]);
        let value = value.strip_prefix("From ").unwrap_or(value);

        value
            .split_once(' ')
            .and_then(|(sender, timestamp)| {
                let timestamp =
                    NaiveDateTime::parse_from_str(timestamp.trim(), SEPARATOR_DATE_FORMAT).ok()?;
                Some(Separator::new(sender, timestamp))
            })
            .filter(|separator| !separator.sender.is_empty())
            .ok_or_else(|| Error::InvalidSeparator(line.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{Error, Separator};

    #[test]
    fn display_separator() {
        let timestamp = NaiveDate::from_ymd_opt(2014, 10, 8)
            .unwrap()
            .and_hms_opt(13, 7, 1)
            .unwrap();
        let separator = Separator::new("Foo_<foo@gmail.com>", timestamp);

        assert_eq!(separator.asctime(), "Wed Oct 08 13:07:01 2014");
        assert_eq!(
            separator.to_string(),
            "From Foo_<foo@gmail.com> Wed Oct 08 13:07:01 2014"
        );
    }

    #[test]
    fn parse_separator() {
        let expected = Separator::new(
            "nobody_Tue_Aug__5_19:10:35_2014",
            NaiveDate::from_ymd_opt(2013, 3, 8)
                .unwrap()
                .and_hms_opt(6, 45, 37)
                .unwrap(),
        );

        for input in [
            "From nobody_Tue_Aug__5_19:10:35_2014 Fri Mar 08 06:45:37 2013\n",
            "From nobody_Tue_Aug__5_19:10:35_2014 Fri Mar 08 06:45:37 2013\r\n",
            "nobody_Tue_Aug__5_19:10:35_2014 Fri Mar 08 06:45:37 2013",
        ] {
            assert_eq!(input.parse::<Separator>().unwrap(), expected);
        }

        assert_eq!(
            expected.to_string().parse::<Separator>().unwrap(),
            expected
        );
    }

    #[test]
    fn reject_separators() {
        for input in [
            "",
            "From ",
            "From MAILER-DAEMON",
            "From Mon, 15 Jan 2018 15:30:00 +0100",
            "From  Fri Mar 08 06:45:37 2013",
            "From x Sat Mar 08 06:45:37 2013",
        ] {
            assert!(
                matches!(input.parse::<Separator>(), Err(Error::InvalidSeparator(line)) if line == input),
                "{} should not parse",
                input.escape_debug()
            );
        }
    }
}
