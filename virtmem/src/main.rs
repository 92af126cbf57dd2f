use std::{path::PathBuf, process};

use anyhow::Context;
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use virtmem::{clamp_geometry, disk::DiskPageLoader, programs::Program};
use vm::{
    mmu::Mmu,
    page_loader::{MemoryPageLoader, PageLoader},
    page_replacer::Policy,
    region_len,
    stats::Stats,
    VmError,
};

#[derive(Parser)]
#[command(name = "virtmem")]
#[command(about = "Demand-paged virtual memory simulator", long_about = None)]
struct Cli {
    /// Number of virtual pages
    npages: usize,

    /// Number of physical frames
    nframes: usize,

    /// Replacement algorithm: rand, fifo or custom
    policy: Policy,

    /// Workload to run
    #[arg(value_enum)]
    program: Program,

    /// Seed for the replacement algorithm and workloads
    #[arg(long)]
    seed: Option<u64>,

    /// Backing store file
    #[arg(long, default_value = "myvirtualdisk")]
    disk: PathBuf,

    /// Keep the backing store in memory instead of on disk
    #[arg(long)]
    in_memory: bool,

    /// Print a single CSV line instead of the report
    #[arg(long)]
    csv: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let (npages, nframes) = clamp_geometry(cli.npages, cli.nframes);

    region_len(npages).ok_or(VmError::InvalidGeometry { npages, nframes })?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stats = if cli.in_memory {
        simulate(cli, npages, nframes, &mut rng, MemoryPageLoader::new(npages))?
    } else {
        let disk = DiskPageLoader::create(&cli.disk, npages)
            .context("couldn't create virtual disk")?;
        info!("disco em {}", disk.path().display());
        simulate(cli, npages, nframes, &mut rng, disk)?
    };

    if cli.csv {
        println!(
            "{}",
            stats.csv_line(cli.policy.name(), cli.program.name(), npages, nframes)
        );
    } else {
        println!("{}", stats);
    }

    Ok(())
}

fn simulate<L: PageLoader>(
    cli: &Cli,
    npages: usize,
    nframes: usize,
    rng: &mut StdRng,
    loader: L,
) -> anyhow::Result<Stats> {
    let mut mmu = Mmu::new(npages, nframes, cli.policy, rng, loader)
        .context("couldn't create page table")?;

    info!(
        "rodando {} sobre {} páginas com {} frames ({})",
        cli.program,
        npages,
        nframes,
        mmu.handler().replacer().policy()
    );

    let result = cli.program.run(&mut mmu, rng)?;
    println!("{} result is {}", cli.program, result);

    Ok(mmu.stats())
}
