//! Tratador de page faults.
//!
//! Todo fault cai em exatamente um de três caminhos:
//!
//! 1. **install**: a página não está residente e existe frame livre. O menor
//!    frame livre recebe a página, mapeada como somente leitura.
//! 2. **upgrade**: a página está residente como leitura e houve escrita. A
//!    entrada vira leitura e escrita ali mesmo, sem tocar no disco.
//! 3. **eviction**: a página não está residente e todos os frames estão
//!    ocupados. O replacer escolhe um frame vítima; se a vítima estiver suja
//!    ela é salva no disco, a página dela é desmapeada e a página que causou o
//!    fault é lida para o frame como somente leitura.
//!
//! Se o disco falhar no meio do caminho, nenhuma tabela é alterada: a leitura
//! acontece antes de qualquer mapeamento mudar, então o fault pode ser
//! repetido depois.

use log::{debug, trace};

use crate::{
    error::Result,
    frame_range,
    frame_table::FrameTable,
    page_loader::PageLoader,
    page_replacer::PageReplacer,
    page_table::{PageTable, Protection},
    stats::Stats,
    PAGE_SIZE,
};

/// O que um fault fez.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaultOutcome {
    Installed {
        frame_index: usize,
    },
    Upgraded {
        frame_index: usize,
    },
    Evicted {
        frame_index: usize,
        victim_page: usize,
        written_back: bool,
    },
}

/// Estado que pertence ao tratador: ocupação dos frames, cursor do replacer
/// e os contadores da execução. Ninguém mais mexe nisso.
#[derive(Debug, Clone)]
pub struct FaultHandler {
    frames: FrameTable,
    replacer: PageReplacer,
    stats: Stats,
}

impl FaultHandler {
    pub fn new(frame_count: usize, replacer: PageReplacer) -> Self {
        assert!(frame_count > 0, "fault handler needs at least one frame");

        FaultHandler {
            frames: FrameTable::new(frame_count),
            replacer,
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    pub fn replacer(&self) -> &PageReplacer {
        &self.replacer
    }

    /// Resolve um fault em `page_number`.
    ///
    /// `physmem` é a memória física inteira, `frame_count * PAGE_SIZE` bytes;
    /// só o frame escolhido aqui é lido ou escrito. Um fault que falha no
    /// disco não é contado.
    pub fn handle<L: PageLoader>(
        &mut self,
        page_number: usize,
        page_table: &mut PageTable,
        physmem: &mut [u8],
        loader: &mut L,
    ) -> Result<FaultOutcome> {
        let entry = page_table.get(page_number);

        let outcome = match entry.protection {
            Protection::None => match self.frames.first_free() {
                Some(frame_index) => {
                    self.install(page_number, frame_index, page_table, physmem, loader)?
                }
                None => self.evict(page_number, page_table, physmem, loader)?,
            },
            Protection::Read => {
                assert_eq!(
                    self.frames.occupant(entry.frame_index),
                    Some(page_number),
                    "frame table out of sync with page table"
                );

                page_table.set(page_number, entry.frame_index, Protection::ReadWrite);
                self.stats.upgrades += 1;

                debug!(
                    "fault: página {} agora leitura/escrita no frame {}",
                    page_number, entry.frame_index
                );

                FaultOutcome::Upgraded {
                    frame_index: entry.frame_index,
                }
            }
            Protection::ReadWrite => {
                panic!("fault on page {page_number}, which is already read-write")
            }
        };

        self.stats.page_faults += 1;

        Ok(outcome)
    }

    fn install<L: PageLoader>(
        &mut self,
        page_number: usize,
        frame_index: usize,
        page_table: &mut PageTable,
        physmem: &mut [u8],
        loader: &mut L,
    ) -> Result<FaultOutcome> {
        // o frame está livre, então ninguém enxerga o conteúdo se a leitura falhar
        let frame = &mut physmem[frame_range(frame_index)];
        self.read_in(page_number, frame_index, frame, loader)?;

        self.frames.set_occupant(frame_index, Some(page_number));
        page_table.set(page_number, frame_index, Protection::Read);
        self.stats.installs += 1;

        debug!("fault: página {} carregada no frame livre {}", page_number, frame_index);

        Ok(FaultOutcome::Installed { frame_index })
    }

    fn evict<L: PageLoader>(
        &mut self,
        page_number: usize,
        page_table: &mut PageTable,
        physmem: &mut [u8],
        loader: &mut L,
    ) -> Result<FaultOutcome> {
        let frame_index = self.replacer.pick_replacement_frame();

        let victim_page = self
            .frames
            .occupant(frame_index)
            .unwrap_or_else(|| panic!("victim frame {frame_index} is empty"));
        let victim = page_table.get(victim_page);

        assert!(
            victim.is_resident() && victim.frame_index == frame_index,
            "victim page {victim_page} not mapped to frame {frame_index}"
        );

        let written_back = victim.protection == Protection::ReadWrite;

        if written_back {
            let frame = &physmem[frame_range(frame_index)];

            trace!(
                "mmu: página {} suja, salvando antes de sobrescrever: {}..",
                victim_page,
                hex::encode(&frame[..16])
            );

            loader.flush_page(victim_page, frame)?;
            self.stats.disk_writes += 1;
        }

        // a vítima continua mapeada até a leitura dar certo
        let mut incoming = vec![0; PAGE_SIZE];
        self.read_in(page_number, frame_index, &mut incoming, loader)?;

        physmem[frame_range(frame_index)].copy_from_slice(&incoming);
        page_table.clear(victim_page);
        page_table.set(page_number, frame_index, Protection::Read);
        self.frames.set_occupant(frame_index, Some(page_number));
        self.stats.evictions += 1;

        debug!(
            "fault: página {} tirou a página {} do frame {}{}",
            page_number,
            victim_page,
            frame_index,
            if written_back { " (suja)" } else { "" }
        );

        Ok(FaultOutcome::Evicted {
            frame_index,
            victim_page,
            written_back,
        })
    }

    fn read_in<L: PageLoader>(
        &mut self,
        page_number: usize,
        frame_index: usize,
        target: &mut [u8],
        loader: &mut L,
    ) -> Result<()> {
        loader.load_page_into(page_number, target)?;
        self.stats.disk_reads += 1;

        trace!(
            "mmu: página {} lida para o frame {}: {}..",
            page_number,
            frame_index,
            hex::encode(&target[..16])
        );

        Ok(())
    }
}
