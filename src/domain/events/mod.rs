//! Product list store events

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    FetchStarted { sequence: u64, query: String, append: bool },
    FetchSucceeded { sequence: u64, received: usize, total: u64 },
    FetchFailed { sequence: u64, message: String },
    StaleResponseDiscarded { sequence: u64, latest: u64 },
    ProductsReset,
}

impl StoreEvent {
    pub fn sequence(&self) -> Option<u64> {
        match self {
            Self::FetchStarted { sequence, .. }
            | Self::FetchSucceeded { sequence, .. }
            | Self::FetchFailed { sequence, .. }
            | Self::StaleResponseDiscarded { sequence, .. } => Some(*sequence),
            Self::ProductsReset => None,
        }
    }
}
