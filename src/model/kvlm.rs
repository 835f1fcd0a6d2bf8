//! Key-value list with message (KVLM)
//!
//! The text format used by commit payloads:
//!
//! ```text
//! tree 29ff16c9c14e2652b22f8b78bb08a5a07930c147
//! parent 206941306e8a8af65b66eaaaea388a7ae24d49a0
//! author Thibault Polge <thibault@thb.lt> 1527025023 +0200
//! gpgsig -----BEGIN PGP SIGNATURE-----
//!  iQIzBAABCAAdFiEExwXquOM8bWb4Q2zVGxM2FxoLkGQFAlsEjZQACgkQGxM2FxoL
//!  -----END PGP SIGNATURE-----
//!
//! Create first draft
//! ```
//!
//! Each header line is `key SP value LF`. A value continues onto the next line
//! when that line starts with a space; the space is dropped when folding it
//! back in. The first empty line ends the headers and everything after it is
//! the message, kept byte for byte.

use crate::{Error, Result};

/// Ordered multi-map from key to one or more values, plus a trailing message
///
/// Keys keep the order of their first appearance. A key seen again appends
/// to its existing value list instead of creating a second entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Kvlm {
    entries: Vec<(Vec<u8>, Vec<Vec<u8>>)>,
    message: Vec<u8>,
}

impl Kvlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `key`
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// All values stored under `key`, in arrival order
    pub fn get(&self, key: &[u8]) -> Option<&[Vec<u8>]> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, values)| values.as_slice())
    }

    /// The first value stored under `key`
    pub fn first(&self, key: &[u8]) -> Option<&[u8]> {
        self.get(key)
            .and_then(|values| values.first())
            .map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|(k, _)| k.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[Vec<u8>])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_slice(), values.as_slice()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<Vec<u8>>) {
        self.message = message.into();
    }

    /// Builder-style variant of [`Kvlm::set_message`]
    pub fn with_message(mut self, message: impl Into<Vec<u8>>) -> Self {
        self.message = message.into();
        self
    }

    /// Parse a raw payload
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let mut kvlm = Kvlm::new();
        let mut start = 0;

        loop {
            let rest = &raw[start..];
            let space = find(rest, b' ');
            let newline = find(rest, b'\n').ok_or_else(|| {
                Error::MalformedObject(format!(
                    "headers not terminated by a blank line (offset {})",
                    start
                ))
            })?;

            let space = match space {
                Some(space) if space < newline => space,
                _ => {
                    if newline != 0 {
                        return Err(Error::MalformedObject(format!(
                            "header line without a value at offset {}",
                            start
                        )));
                    }
                    kvlm.message = rest[1..].to_vec();
                    return Ok(kvlm);
                }
            };

            let end = value_end(rest, space + 1).ok_or_else(|| {
                Error::MalformedObject(format!("unterminated value at offset {}", start))
            })?;

            let key = &rest[..space];
            let value = replace(&rest[space + 1..end], b"\n ", b"\n");
            kvlm.insert(key, value);

            start += end + 1;
        }
    }

    /// Serialize back into the raw payload format
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (key, values) in &self.entries {
            for value in values {
                out.extend_from_slice(key);
                out.push(b' ');
                out.extend_from_slice(&replace(value, b"\n", b"\n "));
                out.push(b'\n');
            }
        }
        out.push(b'\n');
        out.extend_from_slice(&self.message);
        out
    }
}

/// Offset of the newline that ends a value starting at `from`: the first one
/// not followed by a continuation space.
fn value_end(data: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        let newline = pos + find(&data[pos..], b'\n')?;
        if data.get(newline + 1) != Some(&b' ') {
            return Some(newline);
        }
        pos = newline + 1;
    }
}

fn find(data: &[u8], byte: u8) -> Option<usize> {
    data.iter().position(|&b| b == byte)
}

fn replace(data: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut i = 0;
    while i < data.len() {
        if data[i..].starts_with(from) {
            out.extend_from_slice(to);
            i += from.len();
        } else {
            out.push(data[i]);
            i += 1;
        }
    }
    out
}
