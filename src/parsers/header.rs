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

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

// Line anchors follow `\n`, `\r` and `\r\n` endings alike.
static FROM_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mR)^From:*\s*(.*)$").expect("invalid From line regex"));
static DATE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mR)^Date:*(.*)$").expect("invalid Date line regex"));
static FROM_QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mR)^>*From ").expect("invalid From quoting regex"));

/// Returns the remainder of the first line starting with `From`.
///
/// This is not a header lookup: a `From ` envelope line sitting above the
/// headers, or any body line starting with `From`, is matched as well if it
/// comes first.
pub fn find_sender(message: &str) -> Option<&str> {
    FROM_LINE
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str())
}

/// Returns the remainder of the first line starting with `Date`, colons
/// excluded.
pub fn find_date(message: &str) -> Option<&str> {
    DATE_LINE
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str())
}

/// Prepends `>` to every line matching `^>*From `.
pub fn quote_from_lines(message: &str) -> Cow<'_, str> {
    FROM_QUOTE.replace_all(message, ">$0")
}

/// Replaces every whitespace character with `_`.
pub fn sender_token(sender: &str) -> String {
    sender
        .chars()
        .map(|ch| if ch.is_whitespace() { '_' } else { ch })
        .collect()
}
