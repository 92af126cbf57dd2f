/// Bits de proteção de uma entrada da tabela de páginas.
///
/// Enquanto residente a página só avança: `None -> Read -> ReadWrite`.
/// A eviction volta para `None`.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Protection {
    #[default]
    None,
    Read,
    ReadWrite,
}

impl Protection {
    pub fn allows(self, write: bool) -> bool {
        match self {
            Protection::None => false,
            Protection::Read => !write,
            Protection::ReadWrite => true,
        }
    }
}

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct PageTableEntry {
    /// Sem significado enquanto `protection` for `None`.
    pub frame_index: usize,
    pub protection: Protection,
}

impl PageTableEntry {
    pub fn is_resident(&self) -> bool {
        self.protection != Protection::None
    }
}

/// Tabela de páginas de um nível, uma entrada por página virtual.
pub struct PageTable {
    table: Vec<PageTableEntry>,
}

impl PageTable {
    pub fn new(page_count: usize) -> Self {
        PageTable {
            table: vec![PageTableEntry::default(); page_count],
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn get(&self, page_number: usize) -> PageTableEntry {
        self.table[page_number]
    }

    pub fn set(&mut self, page_number: usize, frame_index: usize, protection: Protection) {
        self.table[page_number] = PageTableEntry {
            frame_index,
            protection,
        };
    }

    pub fn clear(&mut self, page_number: usize) {
        self.table[page_number] = PageTableEntry::default();
    }
}
