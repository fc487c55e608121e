//! Compression of real node indices into dense visible rows.
//!
//! The real index space is cut into fixed-size blocks. Each block keeps the sorted offsets of
//! its visible members and a running total of visible nodes up to the end of the block, so a
//! visibility change inside a window only rebuilds the blocks the window touches plus the
//! running totals after them.

use crate::NOT_LOADED;
use crate::error::{Error, Result};
use std::ops::Range;

const MIN_BLOCK_SIZE: usize = 32;
const MAX_BLOCK_SIZE: usize = 4096;

#[derive(Debug, Clone)]
pub struct VisibleIndexMap {
    real_len: usize,
    block_size: usize,
    blocks: Vec<Vec<u32>>,
    /// `block_ends[b]` = number of visible nodes in blocks `0..=b`.
    block_ends: Vec<usize>,
}

impl VisibleIndexMap {
    pub fn build(real_len: usize, is_visible: impl Fn(usize) -> bool) -> Self {
        let block_size = real_len.isqrt().clamp(MIN_BLOCK_SIZE, MAX_BLOCK_SIZE);
        Self::with_block_size(real_len, block_size, is_visible)
    }

    pub fn with_block_size(
        real_len: usize,
        block_size: usize,
        is_visible: impl Fn(usize) -> bool,
    ) -> Self {
        let block_size = block_size.clamp(1, u32::MAX as usize);
        let block_count = real_len.div_ceil(block_size);
        let mut map = Self {
            real_len,
            block_size,
            blocks: vec![Vec::new(); block_count],
            block_ends: vec![0; block_count],
        };
        for b in 0..block_count {
            map.fill_block(b, &is_visible);
        }
        map.recount_from(0);
        map
    }

    pub fn real_len(&self) -> usize {
        self.real_len
    }

    pub fn visible_len(&self) -> usize {
        self.block_ends.last().copied().unwrap_or(0)
    }

    /// `Some(NOT_LOADED)` for `NOT_LOADED`; `None` for hidden or out-of-range indices.
    pub fn to_visible(&self, real: usize) -> Option<usize> {
        if real == NOT_LOADED {
            return Some(NOT_LOADED);
        }
        if real >= self.real_len {
            return None;
        }
        let b = real / self.block_size;
        let local = (real - b * self.block_size) as u32;
        self.blocks[b]
            .binary_search(&local)
            .ok()
            .map(|pos| self.rows_before(b) + pos)
    }

    pub fn to_real(&self, row: usize) -> Result<usize> {
        let len = self.visible_len();
        if row >= len {
            return Err(Error::RowOutOfRange { row, len });
        }
        let b = self.block_ends.partition_point(|&end| end <= row);
        let pos = row - self.rows_before(b);
        Ok(b * self.block_size + self.blocks[b][pos] as usize)
    }

    /// Re-reads visibility for the real indices in `range` (clamped to the map).
    pub fn update(&mut self, range: Range<usize>, is_visible: impl Fn(usize) -> bool) {
        let start = range.start.min(self.real_len);
        let end = range.end.min(self.real_len);
        if start >= end {
            return;
        }
        let first = start / self.block_size;
        let last = (end - 1) / self.block_size;
        for b in first..=last {
            self.fill_block(b, &is_visible);
        }
        self.recount_from(first);
    }

    pub fn rebuild(&mut self, is_visible: impl Fn(usize) -> bool) {
        self.update(0..self.real_len, is_visible);
    }

    fn rows_before(&self, block: usize) -> usize {
        if block == 0 {
            0
        } else {
            self.block_ends[block - 1]
        }
    }

    fn fill_block(&mut self, block: usize, is_visible: &impl Fn(usize) -> bool) {
        let base = block * self.block_size;
        let end = (base + self.block_size).min(self.real_len);
        let members = &mut self.blocks[block];
        members.clear();
        members.extend(
            (base..end)
                .filter(|&real| is_visible(real))
                .map(|real| (real - base) as u32),
        );
    }

    fn recount_from(&mut self, block: usize) {
        let mut total = self.rows_before(block);
        for b in block..self.blocks.len() {
            total += self.blocks[b].len();
            self.block_ends[b] = total;
        }
    }
}
