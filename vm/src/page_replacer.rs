use std::{fmt, str::FromStr};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::error::VmError;

/// Algoritmo de substituição, escolhido pelo nome na linha de comando.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Policy {
    Random,
    Fifo,
    Custom,
}

impl Policy {
    pub const NAMES: [&'static str; 3] = ["rand", "fifo", "custom"];

    pub fn name(self) -> &'static str {
        match self {
            Policy::Random => "rand",
            Policy::Fifo => "fifo",
            Policy::Custom => "custom",
        }
    }
}

impl FromStr for Policy {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rand" => Ok(Policy::Random),
            "fifo" => Ok(Policy::Fifo),
            "custom" => Ok(Policy::Custom),
            other => Err(VmError::UnknownPolicy(other.to_owned())),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Estado da escolha de vítima. Só é consultado com todos os frames ocupados.
#[derive(Debug, Clone)]
pub enum PageReplacer {
    Random {
        rng: StdRng,
        frame_count: usize,
    },
    Fifo {
        cursor: usize,
        frame_count: usize,
    },
    /// Percorre uma permutação embaralhada dos índices de frame.
    Custom {
        order: Vec<usize>,
        cursor: usize,
    },
}

impl PageReplacer {
    /// Toda aleatoriedade da política sai de `rng` aqui, então uma seed fixa
    /// a execução inteira.
    pub fn new(policy: Policy, frame_count: usize, rng: &mut StdRng) -> Self {
        assert!(frame_count > 0, "replacement needs at least one frame");

        match policy {
            Policy::Random => PageReplacer::Random {
                rng: StdRng::seed_from_u64(rng.gen()),
                frame_count,
            },
            Policy::Fifo => PageReplacer::Fifo {
                cursor: 0,
                frame_count,
            },
            Policy::Custom => {
                let mut order: Vec<usize> = (0..frame_count).collect();
                order.shuffle(rng);

                PageReplacer::Custom { order, cursor: 0 }
            }
        }
    }

    pub fn policy(&self) -> Policy {
        match self {
            PageReplacer::Random { .. } => Policy::Random,
            PageReplacer::Fifo { .. } => Policy::Fifo,
            PageReplacer::Custom { .. } => Policy::Custom,
        }
    }

    /// A permutação percorrida pela política custom.
    pub fn custom_order(&self) -> Option<&[usize]> {
        match self {
            PageReplacer::Custom { order, .. } => Some(order),
            _ => None,
        }
    }

    pub fn pick_replacement_frame(&mut self) -> usize {
        match self {
            PageReplacer::Random { rng, frame_count } => rng.gen_range(0..*frame_count),
            PageReplacer::Fifo {
                cursor,
                frame_count,
            } => {
                let victim = *cursor;
                *cursor = (*cursor + 1) % *frame_count;
                victim
            }
            PageReplacer::Custom { order, cursor } => {
                let victim = order[*cursor];
                *cursor = (*cursor + 1) % order.len();
                victim
            }
        }
    }
}
