//! Pluggable byte compression for archive payloads
//!
//! The packer treats compression as a capability: one operation from raw
//! bytes to compressed bytes and its inverse. The archive's file table
//! carries each file's original size, so codecs never embed a size header of
//! their own — the LZ4 payload is a raw block, exactly what the packed
//! resource reader feeds its decompressor.
//!
//! Available codecs:
//! - [`Lz4Codec`] — raw LZ4 block (the default; fast decompression at load
//!   time is the point of the archive)
//! - [`ZlibCodec`] — zlib stream via flate2, better ratio, slower
//! - [`NoCompression`] — pass-through, for debugging and incompressible data

mod error;

pub use error::{CodecError, CodecResult};

use flate2::Compression;
use flate2::read::{ZlibDecoder, ZlibEncoder};
use std::io::Read;

/// Maximum allowed decompression size (1 GB)
///
/// Limits decompression output so a corrupt or hostile file table cannot
/// request an absurd allocation.
pub const MAX_DECOMPRESSION_SIZE: usize = 1024 * 1024 * 1024;

/// Byte compression capability used by the packer and reader
///
/// Implementations must be deterministic: compressing the same input twice
/// yields identical bytes, so re-running a build with unchanged inputs
/// produces a byte-identical archive.
pub trait Codec {
    /// Short codec name, recorded in logs
    fn name(&self) -> &'static str;

    /// Compress `data` to the codec's wire form
    fn compress(&self, data: &[u8]) -> CodecResult<Vec<u8>>;

    /// Decompress `data`, which must expand to exactly `original_size` bytes
    fn decompress(&self, data: &[u8], original_size: usize) -> CodecResult<Vec<u8>>;
}

/// Raw LZ4 block codec
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn name(&self) -> &'static str {
        "lz4"
    }

    fn compress(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(lz4_flex::block::compress(data))
    }

    fn decompress(&self, data: &[u8], original_size: usize) -> CodecResult<Vec<u8>> {
        if original_size > MAX_DECOMPRESSION_SIZE {
            return Err(CodecError::OutputTooLarge {
                size: original_size,
                limit: MAX_DECOMPRESSION_SIZE,
            });
        }

        lz4_flex::block::decompress(data, original_size)
            .map_err(|e| CodecError::Decompression(format!("LZ4 decompression failed: {e}")))
    }
}

/// Zlib stream codec
#[derive(Debug, Clone, Copy, Default)]
pub struct ZlibCodec;

impl Codec for ZlibCodec {
    fn name(&self) -> &'static str {
        "zlib"
    }

    fn compress(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(data, Compression::default());
        let mut compressed = Vec::new();
        encoder
            .read_to_end(&mut compressed)
            .map_err(|e| CodecError::Compression(format!("Zlib compression failed: {e}")))?;
        Ok(compressed)
    }

    fn decompress(&self, data: &[u8], original_size: usize) -> CodecResult<Vec<u8>> {
        if original_size > MAX_DECOMPRESSION_SIZE {
            return Err(CodecError::OutputTooLarge {
                size: original_size,
                limit: MAX_DECOMPRESSION_SIZE,
            });
        }

        let mut decoder = ZlibDecoder::new(data);
        let mut decompressed = Vec::with_capacity(original_size);

        // Read in chunks so a lying stream cannot blow past the limit.
        let mut buffer = [0u8; 8192];
        loop {
            let bytes_read = decoder
                .read(&mut buffer)
                .map_err(|e| CodecError::Decompression(format!("Zlib decompression failed: {e}")))?;
            if bytes_read == 0 {
                break;
            }
            if decompressed.len() + bytes_read > MAX_DECOMPRESSION_SIZE {
                return Err(CodecError::OutputTooLarge {
                    size: decompressed.len() + bytes_read,
                    limit: MAX_DECOMPRESSION_SIZE,
                });
            }
            decompressed.extend_from_slice(&buffer[..bytes_read]);
        }

        Ok(decompressed)
    }
}

/// Pass-through codec
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompression;

impl Codec for NoCompression {
    fn name(&self) -> &'static str {
        "none"
    }

    fn compress(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn decompress(&self, data: &[u8], _original_size: usize) -> CodecResult<Vec<u8>> {
        Ok(data.to_vec())
    }
}
