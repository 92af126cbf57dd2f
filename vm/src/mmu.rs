use log::trace;
use rand::rngs::StdRng;

use crate::{
    error::{Result, VmError},
    fault::FaultHandler,
    page_loader::PageLoader,
    page_replacer::{PageReplacer, Policy},
    page_table::{PageTable, PageTableEntry},
    region_len,
    stats::Stats,
    PAGE_SIZE,
};

/// Memória virtual de `page_count` páginas sobre `frame_count` frames.
///
/// Um acesso que o mapeamento atual não satisfaz vai para o tratador de
/// fault e depois é repetido, então quem chama só vê o byte.
pub struct Mmu<LOADER: PageLoader> {
    page_table: PageTable,
    physmem: Vec<u8>,
    handler: FaultHandler,
    loader: LOADER,
}

impl<LOADER> Mmu<LOADER>
where
    LOADER: PageLoader,
{
    pub fn new(
        page_count: usize,
        frame_count: usize,
        policy: Policy,
        rng: &mut StdRng,
        loader: LOADER,
    ) -> Result<Self> {
        let invalid = || VmError::InvalidGeometry {
            npages: page_count,
            nframes: frame_count,
        };

        if page_count == 0 || frame_count == 0 {
            return Err(invalid());
        }

        region_len(page_count).ok_or_else(invalid)?;
        let physmem_len = region_len(frame_count).ok_or_else(invalid)?;

        let replacer = PageReplacer::new(policy, frame_count, rng);

        Ok(Mmu {
            page_table: PageTable::new(page_count),
            physmem: vec![0; physmem_len],
            handler: FaultHandler::new(frame_count, replacer),
            loader,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_table.len()
    }

    pub fn frame_count(&self) -> usize {
        self.handler.frames().len()
    }

    /// Tamanho em bytes do espaço virtual.
    pub fn virtual_len(&self) -> usize {
        self.page_count() * PAGE_SIZE
    }

    /// Mapeamento atual de uma página. Nunca causa fault.
    pub fn entry(&self, page_number: usize) -> PageTableEntry {
        self.page_table.get(page_number)
    }

    pub fn stats(&self) -> Stats {
        self.handler.stats()
    }

    pub fn handler(&self) -> &FaultHandler {
        &self.handler
    }

    pub fn loader(&self) -> &LOADER {
        &self.loader
    }

    fn translate_addr(&mut self, address: usize, write: bool) -> Result<usize> {
        let len = self.virtual_len();
        if address >= len {
            return Err(VmError::AddressOutOfRange { address, len });
        }

        let page_number = address / PAGE_SIZE;
        let page_offset = address % PAGE_SIZE;

        loop {
            let entry = self.page_table.get(page_number);

            if entry.protection.allows(write) {
                trace!(
                    "mmu: {} {:#x} página={} frame={} offset={:#x}",
                    if write { "escrita" } else { "leitura" },
                    address,
                    page_number,
                    entry.frame_index,
                    page_offset
                );

                return Ok(entry.frame_index * PAGE_SIZE + page_offset);
            }

            trace!("mmu: page fault na página {}! tratando...", page_number);

            self.handler.handle(
                page_number,
                &mut self.page_table,
                &mut self.physmem,
                &mut self.loader,
            )?;
        }
    }

    pub fn read(&mut self, address: usize) -> Result<u8> {
        let physical = self.translate_addr(address, false)?;

        Ok(self.physmem[physical])
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        let physical = self.translate_addr(address, true)?;

        self.physmem[physical] = value;
        Ok(())
    }
}
