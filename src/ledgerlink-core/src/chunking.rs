use bytes::Bytes;

use crate::error::{ClientError, Result};

/// Outbound bodies are written in pieces of at most this many bytes
pub const CHUNK_SIZE: usize = 10 * 1024;

/// Number of chunks a body of `len` bytes is split into
pub fn chunk_count(len: usize, chunk_size: usize) -> usize {
    if chunk_size == 0 {
        return 0;
    }
    len.div_ceil(chunk_size)
}

/// Borrowing chunk iterator. The last chunk holds the remainder; an empty
/// body yields nothing.
pub fn chunk_body(body: &[u8], chunk_size: usize) -> std::slice::Chunks<'_, u8> {
    body.chunks(chunk_size.max(1))
}

/// Owned request body that hands out cheap `Bytes` slices, for transports
/// that need `'static` chunks to stream.
#[derive(Debug, Clone)]
pub struct ChunkedBody {
    bytes: Bytes,
    chunk_size: usize,
}

impl ChunkedBody {
    pub fn new(bytes: impl Into<Bytes>, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(ClientError::precondition("chunk size must be greater than zero"));
        }
        Ok(Self {
            bytes: bytes.into(),
            chunk_size,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn chunk_count(&self) -> usize {
        chunk_count(self.bytes.len(), self.chunk_size)
    }

    /// Chunks in write order
    pub fn chunks(&self) -> ChunkIter {
        ChunkIter {
            bytes: self.bytes.clone(),
            chunk_size: self.chunk_size,
        }
    }
}

pub struct ChunkIter {
    bytes: Bytes,
    chunk_size: usize,
}

impl Iterator for ChunkIter {
    type Item = Bytes;

    fn next(&mut self) -> Option<Bytes> {
        if self.bytes.is_empty() {
            return None;
        }
        let at = self.chunk_size.min(self.bytes.len());
        Some(self.bytes.split_to(at))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = chunk_count(self.bytes.len(), self.chunk_size);
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_has_no_chunks() {
        let body = ChunkedBody::new(Vec::new(), CHUNK_SIZE).unwrap();
        assert_eq!(body.chunk_count(), 0);
        assert_eq!(body.chunks().count(), 0);
        assert_eq!(chunk_body(&[], CHUNK_SIZE).count(), 0);
    }

    #[test]
    fn test_chunks_reassemble_to_payload() {
        for len in [1, CHUNK_SIZE - 1, CHUNK_SIZE, CHUNK_SIZE + 1, 3 * CHUNK_SIZE + 17] {
            let payload: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let body = ChunkedBody::new(payload.clone(), CHUNK_SIZE).unwrap();

            let chunks: Vec<Bytes> = body.chunks().collect();
            assert_eq!(chunks.len(), len.div_ceil(CHUNK_SIZE), "len {}", len);
            assert!(chunks.iter().all(|c| c.len() <= CHUNK_SIZE));

            let joined: Vec<u8> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
            assert_eq!(joined, payload);
        }
    }

    #[test]
    fn test_last_chunk_is_remainder() {
        let payload = vec![7u8; 2 * CHUNK_SIZE + 5];
        let sizes: Vec<usize> = chunk_body(&payload, CHUNK_SIZE).map(|c| c.len()).collect();
        assert_eq!(sizes, vec![CHUNK_SIZE, CHUNK_SIZE, 5]);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let err = ChunkedBody::new(vec![1u8], 0).unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(chunk_count(10, 0), 0);
    }
}
