//! Append-only accumulator for the binary body of the container.

use crate::error::{PackError, Result};

/// Offset and length assigned to one appended block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodySlot {
    /// Byte offset of the block within the body region.
    pub offset: u32,
    /// Length of the block in bytes.
    pub length: u32,
}

/// One block of body content at its assigned offset.
#[derive(Debug, Clone)]
pub struct BodyBlock {
    /// Byte offset of the block within the body region.
    pub offset: u32,
    /// The block's bytes.
    pub bytes: Vec<u8>,
}

/// Collects resource bytes into a growing body region.
///
/// Each appended block is assigned the running total length as its offset,
/// so blocks pack with zero gap in append order. Offsets are never reused
/// or compacted; the accumulator is consumed when the container is emitted.
#[derive(Debug, Default)]
pub struct BodyAccumulator {
    blocks: Vec<BodyBlock>,
    total_len: u32,
}

impl BodyAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block and return its assigned offset and length.
    ///
    /// The container format addresses the body with u32 fields, so growing
    /// past that ceiling fails with [`PackError::BodyTooLarge`] instead of
    /// wrapping.
    pub fn append(&mut self, bytes: Vec<u8>) -> Result<BodySlot> {
        let offset = self.total_len;
        let length = u32::try_from(bytes.len()).map_err(|_| PackError::BodyTooLarge)?;
        let total = offset.checked_add(length).ok_or(PackError::BodyTooLarge)?;

        self.blocks.push(BodyBlock { offset, bytes });
        self.total_len = total;
        Ok(BodySlot { offset, length })
    }

    /// Total length of the body region so far.
    pub fn total_len(&self) -> u32 {
        self.total_len
    }

    /// All appended blocks, in append order.
    pub fn blocks(&self) -> &[BodyBlock] {
        &self.blocks
    }

    /// True if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
