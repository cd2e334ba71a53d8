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

use mail_mboxify::mailbox::mbox::MessageIterator;

fn main() {
    // Reads an MBox mailbox from stdin and prints each separator as JSON.
    for message in MessageIterator::new(std::io::stdin()) {
        let message = message.unwrap();

        match message.separator() {
            Ok(separator) => println!("{}", serde_json::to_string(&separator).unwrap()),
            Err(err) => eprintln!("{err} ({} bytes)", message.contents().len()),
        }
    }
}
