//! Frame type - the unit of content-addressed storage
//!
//! Layout: `<type> SP <decimal length> NUL <payload>`. The address is the
//! SHA-1 of this whole sequence and the loose-object file holds it zlib
//! compressed.

use crate::model::{Object, ObjectId, ObjectType};
use crate::{Error, Result};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// A typed payload, ready to be framed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Type of content
    pub kind: ObjectType,
    /// Raw payload (unframed, uncompressed)
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn new(kind: ObjectType, payload: Vec<u8>) -> Self {
        Frame { kind, payload }
    }

    /// Serialize an object through its type's contract
    pub fn from_object(object: &Object) -> Self {
        Frame::new(object.fmt(), object.serialize())
    }

    /// Produce the framed byte sequence
    pub fn encode(&self) -> Vec<u8> {
        let header = format!("{} {}\0", self.kind, self.payload.len());
        let mut out = Vec::with_capacity(header.len() + self.payload.len());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Split a framed byte sequence into its tag and payload
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let space = raw
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| Error::MalformedObject("missing type terminator".into()))?;
        let kind = ObjectType::from_bytes(&raw[..space])?;

        let nul = raw[space..]
            .iter()
            .position(|&b| b == 0)
            .map(|i| space + i)
            .ok_or_else(|| Error::MalformedObject("missing length terminator".into()))?;

        let declared: usize = std::str::from_utf8(&raw[space + 1..nul])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                Error::MalformedObject(format!(
                    "invalid length field: {:?}",
                    String::from_utf8_lossy(&raw[space + 1..nul])
                ))
            })?;

        let payload = &raw[nul + 1..];
        if declared != payload.len() {
            return Err(Error::MalformedObject(format!(
                "length mismatch: header says {}, found {}",
                declared,
                payload.len()
            )));
        }

        Ok(Frame::new(kind, payload.to_vec()))
    }

    /// Compute the content address
    pub fn id(&self) -> ObjectId {
        let header = format!("{} {}\0", self.kind, self.payload.len());
        ObjectId::digest_many(&[header.as_bytes(), self.payload.as_slice()])
    }

    /// Frame and compress for storage
    pub fn compress(&self) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.encode())?;
        Ok(encoder.finish()?)
    }

    /// Decompress and decode a stored object
    pub fn decompress(data: &[u8]) -> Result<Self> {
        let mut raw = Vec::new();
        ZlibDecoder::new(data)
            .read_to_end(&mut raw)
            .map_err(|e| Error::Decompression(e.to_string()))?;
        Self::decode(&raw)
    }

    /// Materialize the typed object this frame carries
    pub fn into_object(self) -> Result<Object> {
        Object::deserialize(self.kind, &self.payload)
    }

    /// Get the size of the payload
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}
