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

use std::io::{self, Read, Write};

use mail_mboxify::MboxWriter;

fn main() {
    // Reads an RFC 5322 message from stdin and writes it to stdout as an mboxrd entry.
    let mut message = String::new();
    io::stdin().read_to_string(&mut message).unwrap();

    if let Some(entry) = MboxWriter::new().convert(&message) {
        io::stdout().write_all(entry.as_bytes()).unwrap();
    }
}
