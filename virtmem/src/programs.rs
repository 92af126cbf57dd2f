//! Programas que fazem acessos de byte através da MMU.

use std::fmt;

use clap::ValueEnum;
use rand::{rngs::StdRng, Rng};
use vm::{mmu::Mmu, page_loader::PageLoader, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Program {
    Sort,
    Scan,
    Focus,
}

impl Program {
    pub fn name(self) -> &'static str {
        match self {
            Program::Sort => "sort",
            Program::Scan => "scan",
            Program::Focus => "focus",
        }
    }

    /// Roda o programa sobre a região virtual inteira e devolve o checksum.
    pub fn run<L: PageLoader>(self, mmu: &mut Mmu<L>, rng: &mut StdRng) -> Result<u64> {
        match self {
            Program::Sort => sort_program(mmu, rng),
            Program::Scan => scan_program(mmu),
            Program::Focus => focus_program(mmu, rng),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn sum<L: PageLoader>(mmu: &mut Mmu<L>) -> Result<u64> {
    let mut total = 0u64;
    for address in 0..mmu.virtual_len() {
        total += u64::from(mmu.read(address)?);
    }
    Ok(total)
}

/// Preenche cada byte com `i % 256` e depois soma a região dez vezes.
pub fn scan_program<L: PageLoader>(mmu: &mut Mmu<L>) -> Result<u64> {
    for address in 0..mmu.virtual_len() {
        mmu.write(address, (address % 256) as u8)?;
    }

    let mut total = 0u64;
    for _ in 0..10 {
        total += sum(mmu)?;
    }
    Ok(total)
}

/// Preenche a região com bytes aleatórios e ordena com heap sort no lugar.
pub fn sort_program<L: PageLoader>(mmu: &mut Mmu<L>, rng: &mut StdRng) -> Result<u64> {
    let len = mmu.virtual_len();

    for address in 0..len {
        mmu.write(address, rng.gen())?;
    }

    for start in (0..len / 2).rev() {
        sift_down(mmu, start, len)?;
    }
    for end in (1..len).rev() {
        swap(mmu, 0, end)?;
        sift_down(mmu, 0, end)?;
    }

    sum(mmu)
}

fn swap<L: PageLoader>(mmu: &mut Mmu<L>, a: usize, b: usize) -> Result<()> {
    let first = mmu.read(a)?;
    let second = mmu.read(b)?;
    mmu.write(a, second)?;
    mmu.write(b, first)
}

/// Restaura a propriedade de max-heap para `root` dentro de `0..end`.
fn sift_down<L: PageLoader>(mmu: &mut Mmu<L>, mut root: usize, end: usize) -> Result<()> {
    loop {
        let left = 2 * root + 1;
        if left >= end {
            return Ok(());
        }

        let mut child = left;
        if left + 1 < end && mmu.read(left + 1)? > mmu.read(left)? {
            child = left + 1;
        }

        if mmu.read(child)? <= mmu.read(root)? {
            return Ok(());
        }

        swap(mmu, root, child)?;
        root = child;
    }
}

/// Martela janelas pequenas em pontos aleatórios de uma região quase parada.
pub fn focus_program<L: PageLoader>(mmu: &mut Mmu<L>, rng: &mut StdRng) -> Result<u64> {
    const ROUNDS: usize = 100;
    const WRITES_PER_ROUND: usize = 100;
    const WINDOW: usize = 25;

    let len = mmu.virtual_len();

    for address in 0..len {
        mmu.write(address, 0)?;
    }

    for _ in 0..ROUNDS {
        let start = rng.gen_range(0..len);
        for _ in 0..WRITES_PER_ROUND {
            let address = (start + rng.gen_range(0..WINDOW)) % len;
            mmu.write(address, rng.gen())?;
        }
    }

    sum(mmu)
}
