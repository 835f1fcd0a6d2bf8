//! Object address type using SHA-1

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// A 20-byte SHA-1 digest used as an object's address
///
/// Rendered as 40 lowercase hex characters. The address is always computed
/// over the framed object (`type SP length NUL payload`), never the bare payload.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 20]);

impl ObjectId {
    /// Length of the hex form
    pub const HEX_LEN: usize = 40;

    /// Create an id from raw bytes
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        ObjectId(bytes)
    }

    /// Hash arbitrary data
    pub fn digest(data: &[u8]) -> Self {
        ObjectId(Sha1::digest(data).into())
    }

    /// Hash multiple pieces of data as if concatenated
    pub fn digest_many(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha1::new();
        for part in parts {
            hasher.update(part);
        }
        ObjectId(hasher.finalize().into())
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 40-character hex string
    pub fn from_hex(s: &str) -> crate::Result<Self> {
        if s.len() != Self::HEX_LEN {
            return Err(crate::Error::InvalidHash(format!(
                "expected {} hex characters, got {}",
                Self::HEX_LEN,
                s.len()
            )));
        }
        let mut arr = [0u8; 20];
        hex::decode_to_slice(s, &mut arr)
            .map_err(|e| crate::Error::InvalidHash(format!("{}: {}", s, e)))?;
        Ok(ObjectId(arr))
    }

    /// Get a short prefix for display (first 7 chars)
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }

    /// Fan-out directory name (first two hex characters)
    pub fn dir_name(&self) -> String {
        hex::encode(&self.0[..1])
    }

    /// File name inside the fan-out directory (remaining 38 hex characters)
    pub fn file_name(&self) -> String {
        hex::encode(&self.0[1..])
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short())
    }
}

impl FromStr for ObjectId {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        ObjectId::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let h1 = ObjectId::digest(b"hello");
        let h2 = ObjectId::digest(b"hello");
        let h3 = ObjectId::digest(b"hellp");

        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_known_blob_address() {
        let id = ObjectId::digest(b"blob 6\0hello\n");
        assert_eq!(id.to_hex(), "ce013625030ba8dba906f756967f9e9ca394464a");
    }

    #[test]
    fn test_digest_many_matches_concatenation() {
        let whole = ObjectId::digest(b"blob 6\0hello\n");
        let parts = ObjectId::digest_many(&[&b"blob 6\0"[..], &b"hello\n"[..]]);
        assert_eq!(whole, parts);
    }

    #[test]
    fn test_hex_roundtrip_and_case() {
        let id = ObjectId::from_hex("CE013625030BA8DBA906F756967F9E9CA394464A").unwrap();
        assert_eq!(id.to_hex(), "ce013625030ba8dba906f756967f9e9ca394464a");
        assert_eq!(id.short(), "ce01362");
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(matches!(
            ObjectId::from_hex("abc"),
            Err(crate::Error::InvalidHash(_))
        ));
        assert!(matches!(
            ObjectId::from_hex(&"g".repeat(40)),
            Err(crate::Error::InvalidHash(_))
        ));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let id = ObjectId::digest(b"blob 6\0hello\n");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ce013625030ba8dba906f756967f9e9ca394464a\"");
        assert_eq!(serde_json::from_str::<ObjectId>(&json).unwrap(), id);
    }

    #[test]
    fn test_fan_out_split() {
        let id = ObjectId::from_hex("ce013625030ba8dba906f756967f9e9ca394464a").unwrap();
        assert_eq!(id.dir_name(), "ce");
        assert_eq!(id.file_name(), "013625030ba8dba906f756967f9e9ca394464a");
    }
}
