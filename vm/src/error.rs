use thiserror::Error;

use crate::page_replacer::Policy;

/// Erros que o simulador devolve.
///
/// Invariantes internas quebradas não aparecem aqui, elas dão panic.
#[derive(Error, Debug)]
pub enum VmError {
    #[error("unknown replacement algorithm: {0} (expected one of: {names})", names = Policy::NAMES.join(", "))]
    UnknownPolicy(String),

    #[error("invalid geometry: {npages} pages, {nframes} frames")]
    InvalidGeometry { npages: usize, nframes: usize },

    #[error("address {address:#x} outside virtual memory of {len} bytes")]
    AddressOutOfRange { address: usize, len: usize },

    #[error("backing store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VmError>;
