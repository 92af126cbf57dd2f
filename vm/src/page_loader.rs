use std::io;

use crate::{region_len, PAGE_SIZE};

/// Disco de apoio com um bloco de `PAGE_SIZE` bytes por página virtual.
///
/// Cada chamada transfere exatamente uma página inteira.
pub trait PageLoader {
    fn load_page_into(&mut self, page_number: usize, target: &mut [u8]) -> io::Result<()>;

    fn flush_page(&mut self, page_number: usize, buffer: &[u8]) -> io::Result<()>;
}

/// Disco de apoio que vive inteiro na memória. Os blocos começam zerados.
#[derive(Debug, Clone)]
pub struct MemoryPageLoader {
    blocks: Vec<u8>,
}

impl MemoryPageLoader {
    /// # Panics
    ///
    /// Se `page_count * PAGE_SIZE` não couber num `usize`.
    pub fn new(page_count: usize) -> Self {
        let len = region_len(page_count)
            .unwrap_or_else(|| panic!("{page_count} pages do not fit in memory"));

        MemoryPageLoader {
            blocks: vec![0; len],
        }
    }

    pub fn block(&self, page_number: usize) -> &[u8] {
        &self.blocks[page_number * PAGE_SIZE..(page_number + 1) * PAGE_SIZE]
    }

    fn block_mut(&mut self, page_number: usize) -> io::Result<&mut [u8]> {
        let start = page_number * PAGE_SIZE;

        self.blocks
            .get_mut(start..start + PAGE_SIZE)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("page {page_number} has no backing block"),
                )
            })
    }
}

impl PageLoader for MemoryPageLoader {
    fn load_page_into(&mut self, page_number: usize, target: &mut [u8]) -> io::Result<()> {
        let block = self.block_mut(page_number)?;
        target.copy_from_slice(block);
        Ok(())
    }

    fn flush_page(&mut self, page_number: usize, buffer: &[u8]) -> io::Result<()> {
        let block = self.block_mut(page_number)?;
        block.copy_from_slice(buffer);
        Ok(())
    }
}
