pub mod batch;

pub use batch::{default_workers, verify_cards, BatchReport, BatchSummary, CardRecord};
