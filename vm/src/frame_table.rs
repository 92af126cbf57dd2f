/// Qual página (se alguma) ocupa cada frame físico.
#[derive(Debug, Clone)]
pub struct FrameTable {
    occupants: Vec<Option<usize>>,
}

impl FrameTable {
    pub fn new(frame_count: usize) -> Self {
        FrameTable {
            occupants: vec![None; frame_count],
        }
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn occupant(&self, frame_index: usize) -> Option<usize> {
        self.occupants[frame_index]
    }

    pub fn set_occupant(&mut self, frame_index: usize, page_number: Option<usize>) {
        self.occupants[frame_index] = page_number;
    }

    /// Menor frame vazio.
    pub fn first_free(&self) -> Option<usize> {
        self.occupants.iter().position(Option::is_none)
    }

    pub fn frame_of(&self, page_number: usize) -> Option<usize> {
        self.occupants
            .iter()
            .position(|occupant| *occupant == Some(page_number))
    }

    pub fn resident_count(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_some()).count()
    }
}
