#![no_main]
use libfuzzer_sys::fuzz_target;

use chrono::{TimeZone, Utc};
use mail_mboxify::{
    mailbox::mbox::MessageIterator,
    parsers::{
        fields::date::{parse_date, parse_date_value},
        header::{find_date, find_sender, quote_from_lines},
        message_stream::MessageStream,
    },
    MboxWriter, Separator,
};

static RFC822_ALPHABET: &[u8] = b"0123456789abcdefghijklm:=- \r\n>FromDateESTPDUGMZ()";

fuzz_target!(|data: &[u8]| {
    for data_ in [
        std::borrow::Cow::from(data),
        std::borrow::Cow::from(into_alphabet(data, RFC822_ALPHABET)),
    ] {
        let data = data_.as_ref();
        let text = String::from_utf8_lossy(data);

        // Fuzz every parsing function
        parse_date(&MessageStream::new(data), false);
        parse_date(&MessageStream::new(data), true);
        parse_date_value(&text, &Utc);
        find_sender(&text);
        find_date(&text);
        quote_from_lines(&text);
        let _ = text.parse::<Separator>();

        // Fuzz the writer and read its output back
        let writer = MboxWriter::new()
            .with_timezone(Utc)
            .with_clock(|| Utc.timestamp_opt(0, 0).unwrap());
        if let Some(entry) = writer.convert(&text) {
            assert!(entry.ends_with("\r\n"));
            for message in MessageIterator::new(entry.as_bytes()) {
                let _ = message.unwrap();
            }
        }

        for message in MessageIterator::new(data) {
            let _ = message.unwrap();
        }
    }
});

fn into_alphabet(data: &[u8], alphabet: &[u8]) -> Vec<u8> {
    data.iter()
        .map(|&byte| alphabet[byte as usize % alphabet.len()])
        .collect()
}
