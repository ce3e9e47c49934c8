//! Header block scanner shared by commit and tag payloads
//!
//! Both payloads are a run of `<key> <value>\n` lines, a blank line and a free
//! form body. A value continues on every following line that starts with a
//! space; the leading space of such a line is dropped and the lines are joined
//! with `\n`.

use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Key,
    Value,
}

/// Result of scanning a commit or tag payload
#[derive(Debug, Clone, Default)]
pub(crate) struct HeaderBlock {
    pub headers: Vec<(String, String)>,
    /// The body after the blank line, without its final trailing newline
    pub body: Option<Bytes>,
}

impl HeaderBlock {
    /// Scan the headers of `raw`; the body is a zero-copy slice of it
    pub fn scan(raw: &Bytes) -> Self {
        let mut headers = Vec::new();
        let mut state = ScanState::Key;
        let mut key_start = 0;
        let mut key_end = 0;
        let mut value: Vec<u8> = Vec::new();
        let mut cursor = 0;

        while cursor < raw.len() {
            let byte = raw[cursor];

            match state {
                ScanState::Key => {
                    if cursor == key_start && byte == b'\n' {
                        // blank line: the body starts right after it
                        let body_start = cursor + 1;
                        let body_end = if raw.ends_with(b"\n") && raw.len() > body_start {
                            raw.len() - 1
                        } else {
                            raw.len()
                        };

                        return Self {
                            headers,
                            body: Some(raw.slice(body_start..body_end.max(body_start))),
                        };
                    }

                    if byte == b' ' {
                        key_end = cursor;
                        state = ScanState::Value;
                    } else if byte == b'\n' {
                        // a key without a value carries nothing to assign
                        key_start = cursor + 1;
                    }
                }
                ScanState::Value => {
                    let continues = byte == b'\n' && raw.get(cursor + 1) == Some(&b' ');

                    if continues {
                        value.push(b'\n');
                        cursor += 1;
                    } else if byte == b'\n' {
                        headers.push(Self::entry(&raw[key_start..key_end], &value));
                        value.clear();
                        key_start = cursor + 1;
                        state = ScanState::Key;
                    } else {
                        value.push(byte);
                    }
                }
            }

            cursor += 1;
        }

        if state == ScanState::Value {
            headers.push(Self::entry(&raw[key_start..key_end], &value));
        }

        Self {
            headers,
            body: None,
        }
    }

    /// First value recorded for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Every value recorded for `key`, in payload order
    pub fn get_all<'h>(&'h self, key: &'h str) -> impl Iterator<Item = &'h str> + 'h {
        self.headers
            .iter()
            .filter(move |(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn entry(key: &[u8], value: &[u8]) -> (String, String) {
        (
            String::from_utf8_lossy(key).into_owned(),
            String::from_utf8_lossy(value).into_owned(),
        )
    }
}
