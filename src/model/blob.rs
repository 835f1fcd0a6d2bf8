//! Blob type - opaque file contents

/// Raw bytes stored as-is; serialization is the identity
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Blob { data: data.into() }
    }

    pub fn serialize(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        Blob {
            data: data.to_vec(),
        }
    }

    /// Get the size of the data
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
