// I/O utilities for reading FLAC containers

use std::io::{Read, Seek, SeekFrom};

/// Random-access view over the bytes of a container.
///
/// Any `Read + Seek` value (a `File`, a `Cursor<Vec<u8>>`, ...) is a byte source.
pub trait ByteSource {
    /// Read exactly `length` bytes starting at `offset`.
    fn read_at(&mut self, offset: u64, length: usize) -> std::io::Result<Vec<u8>>;

    /// Total number of bytes in the source.
    fn total_length(&mut self) -> std::io::Result<u64>;
}

impl<R: Read + Seek> ByteSource for R {
    fn read_at(&mut self, offset: u64, length: usize) -> std::io::Result<Vec<u8>> {
        self.seek(SeekFrom::Start(offset))?;
        let mut buffer = vec![0u8; length];
        self.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    fn total_length(&mut self) -> std::io::Result<u64> {
        self.seek(SeekFrom::End(0))
    }
}

/// Bounds-checked cursor over a block payload.
///
/// Every read returns `None` instead of reading past the end, so each block
/// decoder can map a short payload onto its own truncation error.
#[derive(Debug, Clone)]
pub struct PayloadReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PayloadReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        PayloadReader { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Borrow the next `length` bytes.
    pub fn read_bytes(&mut self, length: usize) -> Option<&'a [u8]> {
        if length > self.remaining() {
            return None;
        }
        let bytes = &self.data[self.pos..self.pos + length];
        self.pos += length;
        Some(bytes)
    }

    /// Borrow everything left in the payload.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.pos..];
        self.pos = self.data.len();
        bytes
    }

    pub fn skip(&mut self, length: usize) -> Option<()> {
        self.read_bytes(length).map(|_| ())
    }

    fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let mut buffer = [0u8; N];
        buffer.copy_from_slice(self.read_bytes(N)?);
        Some(buffer)
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        self.read_array::<1>().map(|b| b[0])
    }

    /// Read big-endian 16-bit integer
    pub fn read_be_u16(&mut self) -> Option<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Read big-endian 32-bit integer
    pub fn read_be_u32(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Read big-endian 64-bit integer
    pub fn read_be_u64(&mut self) -> Option<u64> {
        self.read_array().map(u64::from_be_bytes)
    }

    /// Read little-endian 32-bit integer
    pub fn read_le_u32(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a 32-bit length prefix (big-endian) followed by that many bytes.
    pub fn read_be_prefixed(&mut self) -> Option<&'a [u8]> {
        let length = self.read_be_u32()? as usize;
        self.read_bytes(length)
    }

    /// Read a 32-bit length prefix (little-endian) followed by that many bytes.
    pub fn read_le_prefixed(&mut self) -> Option<&'a [u8]> {
        let length = self.read_le_u32()? as usize;
        self.read_bytes(length)
    }
}
