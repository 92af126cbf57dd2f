//! Memória virtual paginada sob demanda em cima de poucos frames físicos.

use std::ops::Range;

pub mod error;
pub mod fault;
pub mod frame_table;
pub mod mmu;
pub mod page_loader;
pub mod page_replacer;
pub mod page_table;
pub mod stats;

pub use error::{Result, VmError};

/// Tamanho de cada página (e de cada frame) em bytes.
pub const PAGE_SIZE: usize = 4096;

/// Faixa de bytes de um frame dentro da memória física.
pub fn frame_range(frame_idx: usize) -> Range<usize> {
    Range {
        start: frame_idx * PAGE_SIZE,
        end: (frame_idx + 1) * PAGE_SIZE,
    }
}

/// Quantos bytes ocupam `count` páginas, ou `None` se não cabe num `usize`.
pub fn region_len(count: usize) -> Option<usize> {
    count.checked_mul(PAGE_SIZE)
}
