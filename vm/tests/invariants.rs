//! Testes de propriedade da contagem de faults e da ocupação dos frames.

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use vm::{
    mmu::Mmu,
    page_loader::MemoryPageLoader,
    page_replacer::Policy,
    page_table::Protection,
    PAGE_SIZE,
};

fn policy() -> impl Strategy<Value = Policy> {
    prop_oneof![Just(Policy::Random), Just(Policy::Fifo), Just(Policy::Custom)]
}

/// (página, offset, escrita?)
fn accesses(page_count: usize) -> impl Strategy<Value = Vec<(usize, usize, bool)>> {
    prop::collection::vec((0..page_count, 0..PAGE_SIZE, any::<bool>()), 1..200)
}

fn geometry() -> impl Strategy<Value = (usize, usize)> {
    (1usize..12).prop_flat_map(|pages| (Just(pages), 1..=pages))
}

fn check_sync(mmu: &Mmu<MemoryPageLoader>) -> Result<(), TestCaseError> {
    let frames = mmu.handler().frames();

    for page in 0..mmu.page_count() {
        let entry = mmu.entry(page);
        if entry.is_resident() {
            prop_assert_eq!(frames.occupant(entry.frame_index), Some(page));
        } else {
            prop_assert_eq!(frames.frame_of(page), None);
        }
    }

    for frame in 0..mmu.frame_count() {
        if let Some(page) = frames.occupant(frame) {
            prop_assert_eq!(mmu.entry(page).frame_index, frame);
            prop_assert!(mmu.entry(page).is_resident());
        }
    }

    prop_assert!(frames.resident_count() <= mmu.frame_count());
    Ok(())
}

proptest! {
    #[test]
    fn counters_and_tables_stay_consistent(
        (page_count, frame_count) in geometry(),
        policy in policy(),
        seed in any::<u64>(),
        script in accesses(12),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mmu = Mmu::new(
            page_count,
            frame_count,
            policy,
            &mut rng,
            MemoryPageLoader::new(page_count),
        ).unwrap();

        for (page, offset, write) in script {
            let page = page % page_count;
            let address = page * PAGE_SIZE + offset;
            let before = mmu.stats();
            let was = mmu.entry(page).protection;

            if write {
                mmu.write(address, (page as u8).wrapping_add(1)).unwrap();
            } else {
                mmu.read(address).unwrap();
            }

            let after = mmu.stats();
            let faults = after.page_faults - before.page_faults;

            prop_assert!(faults <= 2);
            prop_assert_eq!(after.page_faults, after.installs + after.upgrades + after.evictions);
            prop_assert_eq!(after.disk_reads, after.installs + after.evictions);
            prop_assert_eq!(
                after.disk_reads - before.disk_reads,
                (after.installs - before.installs) + (after.evictions - before.evictions)
            );
            prop_assert!(after.disk_writes - before.disk_writes <= 1);
            prop_assert!(after.disk_writes <= after.evictions);

            if was.allows(write) {
                prop_assert_eq!(faults, 0);
            }

            let expected = if write { Protection::ReadWrite } else { was.max(Protection::Read) };
            prop_assert_eq!(mmu.entry(page).protection, expected);

            check_sync(&mmu)?;
        }
    }

    #[test]
    fn contents_survive_paging(
        (page_count, frame_count) in geometry(),
        policy in policy(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mmu = Mmu::new(
            page_count,
            frame_count,
            policy,
            &mut rng,
            MemoryPageLoader::new(page_count),
        ).unwrap();

        for page in 0..page_count {
            mmu.write(page * PAGE_SIZE + page, page as u8 + 1).unwrap();
        }
        for page in (0..page_count).rev() {
            prop_assert_eq!(mmu.read(page * PAGE_SIZE + page).unwrap(), page as u8 + 1);
        }
    }
}

#[test]
fn custom_victims_replay_with_same_seed() {
    fn victims(seed: u64) -> (Vec<usize>, Vec<usize>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mmu = Mmu::new(12, 4, Policy::Custom, &mut rng, MemoryPageLoader::new(12)).unwrap();
        let order = mmu.handler().replacer().custom_order().unwrap().to_vec();

        let mut victims = Vec::new();
        for page in 0..12 {
            mmu.read(page * PAGE_SIZE).unwrap();
            if page >= 4 {
                let frame = mmu.entry(page).frame_index;
                victims.push(frame);
            }
        }

        (order, victims)
    }

    let (order, first) = victims(2024);
    let (_, second) = victims(2024);

    assert_eq!(first, second);
    assert_eq!(&first[..4], &order[..]);
    assert_eq!(&first[4..], &order[..]);
}
