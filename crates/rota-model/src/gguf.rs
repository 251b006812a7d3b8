//! GGUF container header.
//!
//! Only the fixed-size prefix is read:
//!
//! ```text
//! magic "GGUF" | version u32 | tensor_count u64 | metadata_kv_count u64
//! ```
//!
//! All integers are little-endian. Version 1 used 32-bit counts and is rejected.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::error::LoadError;

/// File magic at offset 0.
pub const GGUF_MAGIC: [u8; 4] = *b"GGUF";

/// Header versions with 64-bit counts.
const SUPPORTED_VERSIONS: [u32; 2] = [2, 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GgufHeader {
    pub version: u32,
    pub tensor_count: u64,
    pub metadata_kv_count: u64,
}

impl GgufHeader {
    /// Read and validate the header at the start of `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidHeader`] for a wrong magic or a truncated
    /// header, and [`LoadError::UnsupportedVersion`] for versions other than 2 and 3.
    pub fn read_from(reader: &mut impl Read) -> Result<Self, LoadError> {
        let mut magic = [0u8; 4];
        read_exact(reader, &mut magic)?;
        if magic != GGUF_MAGIC {
            return Err(LoadError::InvalidHeader(format!(
                "expected GGUF magic, found {magic:02x?}"
            )));
        }

        let mut word = [0u8; 4];
        read_exact(reader, &mut word)?;
        let version = u32::from_le_bytes(word);
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(LoadError::UnsupportedVersion(version));
        }

        let mut count = [0u8; 8];
        read_exact(reader, &mut count)?;
        let tensor_count = u64::from_le_bytes(count);
        read_exact(reader, &mut count)?;
        let metadata_kv_count = u64::from_le_bytes(count);

        Ok(Self {
            version,
            tensor_count,
            metadata_kv_count,
        })
    }

    /// Read the header of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Missing`] if the file does not exist, plus the
    /// errors of [`Self::read_from`].
    pub fn read_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                LoadError::Missing(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::read_from(&mut BufReader::new(file))
    }
}

fn read_exact(reader: &mut impl Read, buf: &mut [u8]) -> Result<(), LoadError> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            LoadError::InvalidHeader("truncated GGUF header".into())
        } else {
            LoadError::InvalidHeader(e.to_string())
        }
    })
}

/// Encode a header the way a GGUF writer would. Test fixtures only.
#[cfg(test)]
pub(crate) fn encode_header(version: u32, tensor_count: u64, metadata_kv_count: u64) -> Vec<u8> {
    let mut bytes = GGUF_MAGIC.to_vec();
    bytes.extend_from_slice(&version.to_le_bytes());
    bytes.extend_from_slice(&tensor_count.to_le_bytes());
    bytes.extend_from_slice(&metadata_kv_count.to_le_bytes());
    bytes
}
