use crate::{
    error::{ErrorPosition, RiffError, RiffResult},
    riff::chunks::ChunkID,
};

/// Forward-only little-endian reader over a byte slice.
///
/// Every read is bounds-checked and reports a `Truncated` error naming what was being
/// read and where, instead of panicking on a short buffer.
#[derive(Debug, Clone)]
pub(crate) struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) const fn new(bytes: &'a [u8]) -> Self {
        ByteCursor { bytes, pos: 0 }
    }

    pub(crate) const fn at(bytes: &'a [u8], pos: usize) -> Self {
        ByteCursor { bytes, pos }
    }

    #[inline]
    pub(crate) const fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) const fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub(crate) fn take(&mut self, len: usize, what: &str) -> RiffResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(RiffError::truncated(
                what,
                len,
                self.remaining(),
                ErrorPosition::new(self.pos).with_description(what),
            ));
        }
        let out = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Advance up to `len` bytes, stopping at the end of the buffer
    pub(crate) fn skip_saturating(&mut self, len: usize) -> usize {
        let skipped = len.min(self.remaining());
        self.pos += skipped;
        skipped
    }

    pub(crate) fn read_array<const N: usize>(&mut self, what: &str) -> RiffResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    pub(crate) fn read_tag(&mut self, what: &str) -> RiffResult<ChunkID> {
        let pos = self.pos;
        let raw = self.read_array::<4>(what)?;
        ChunkID::from_bytes(raw).map_err(|_| {
            RiffError::corrupted_data(
                format!("Non-ASCII {}", what),
                format!("{:02X?}", raw),
                ErrorPosition::new(pos).with_description(what),
            )
        })
    }

    pub(crate) fn read_u16_le(&mut self, what: &str) -> RiffResult<u16> {
        Ok(u16::from_le_bytes(self.read_array(what)?))
    }

    pub(crate) fn read_u32_le(&mut self, what: &str) -> RiffResult<u32> {
        Ok(u32::from_le_bytes(self.read_array(what)?))
    }
}
