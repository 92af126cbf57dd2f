pub mod disk;
pub mod programs;

use log::warn;

/// Menor número de páginas ou frames aceito.
pub const MIN_COUNT: usize = 3;

/// Sobe páginas e frames para pelo menos [`MIN_COUNT`] e limita os frames ao
/// número de páginas. Devolve `(npages, nframes)`.
pub fn clamp_geometry(npages: usize, nframes: usize) -> (usize, usize) {
    let mut frames = nframes;
    let mut pages = npages;

    if frames < MIN_COUNT {
        warn!("nframes {} pequeno demais, usando {}", frames, MIN_COUNT);
        frames = MIN_COUNT;
    }

    if pages < MIN_COUNT {
        warn!("npages {} pequeno demais, usando {}", pages, MIN_COUNT);
        pages = MIN_COUNT;
    }

    if frames > pages {
        warn!("nframes {} maior que npages, usando {}", frames, pages);
        frames = pages;
    }

    (pages, frames)
}
