//! Byte-source utilities.
//!
//! The pipeline sniffs a bounded prefix but decoders must still see the full
//! input, including that prefix. For in-memory buffers this is free; for
//! `Read` sources the helpers here buffer the prefix and replay it in front
//! of the remainder.

use crate::error::Result;
use std::io::Read;
use std::path::Path;

/// Read up to `window` bytes from the front of a reader.
///
/// Short reads are retried until the window is full or the source is
/// exhausted, so a slow source cannot truncate the sniff prefix.
pub fn read_prefix<R: Read>(reader: &mut R, window: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; window];
    let mut filled = 0;

    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    buf.truncate(filled);
    Ok(buf)
}

/// Drain the rest of a reader onto an already-read prefix, yielding the full
/// input with the prefix replayed at the front.
pub fn read_remaining<R: Read>(reader: &mut R, mut prefix: Vec<u8>) -> Result<Vec<u8>> {
    reader.read_to_end(&mut prefix)?;
    Ok(prefix)
}

/// Read a file asynchronously. IO errors bubble up unchanged.
pub async fn read_file_async(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(tokio::fs::read(path.as_ref()).await?)
}

/// Read a file synchronously. IO errors bubble up unchanged.
pub fn read_file_sync(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(std::fs::read(path.as_ref())?)
}
