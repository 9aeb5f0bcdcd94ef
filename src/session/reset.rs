#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetFlow {
    #[default]
    Normal,
    Confirming,
}

impl ResetFlow {
    pub fn request(self) -> Self {
        ResetFlow::Confirming
    }

    pub fn cancel(self) -> Self {
        ResetFlow::Normal
    }

    pub fn is_confirming(&self) -> bool {
        *self == ResetFlow::Confirming
    }
}

/// Pagination cursor over the API's category ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    offset: u32,
    page_size: u32,
}

impl Pagination {
    pub fn new(offset: u32, page_size: u32) -> Self {
        Self { offset, page_size }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn advance(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.page_size),
            ..self
        }
    }
}
