//! DiskPageLoader - Implementação do PageLoader que usa um arquivo comum
//! como disco.
//!
//! Bem mais simples que um swap file com header: o arquivo tem
//! `page_count * PAGE_SIZE` bytes e a página `n` mora no offset
//! `n * PAGE_SIZE`. Ele é truncado e zerado ao abrir, então toda execução
//! começa com páginas em branco.

use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use log::{debug, trace};
use vm::{page_loader::PageLoader, region_len, PAGE_SIZE};

#[derive(Debug)]
pub struct DiskPageLoader {
    file: File,
    path: PathBuf,
    page_count: usize,
}

impl DiskPageLoader {
    /// Cria (ou trunca) o arquivo com espaço para `page_count` blocos.
    pub fn create<P: AsRef<Path>>(path: P, page_count: usize) -> io::Result<DiskPageLoader> {
        let path = path.as_ref().to_path_buf();

        let len = region_len(page_count)
            .and_then(|len| u64::try_from(len).ok())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{page_count} blocks do not fit on a disk"),
                )
            })?;

        let file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        file.set_len(len)?;

        debug!("disk: {} aberto com {} blocos", path.display(), page_count);

        Ok(DiskPageLoader {
            file,
            path,
            page_count,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    fn seek_to(&mut self, page_number: usize, len: usize) -> io::Result<()> {
        if page_number >= self.page_count {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("block {} beyond end of disk ({} blocks)", page_number, self.page_count),
            ));
        }
        if len != PAGE_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("transfer of {len} bytes, expected {PAGE_SIZE}"),
            ));
        }

        self.file
            .seek(SeekFrom::Start((page_number * PAGE_SIZE) as u64))?;
        Ok(())
    }
}

impl PageLoader for DiskPageLoader {
    fn load_page_into(&mut self, page_number: usize, target: &mut [u8]) -> io::Result<()> {
        self.seek_to(page_number, target.len())?;
        self.file.read_exact(target)?;

        trace!("disk: lido bloco {}", page_number);
        Ok(())
    }

    fn flush_page(&mut self, page_number: usize, buffer: &[u8]) -> io::Result<()> {
        self.seek_to(page_number, buffer.len())?;
        self.file.write_all(buffer)?;

        trace!("disk: gravado bloco {}: {}..", page_number, hex::encode(&buffer[..8]));
        Ok(())
    }
}
