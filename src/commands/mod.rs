pub mod decrypt;
pub mod list;

pub use decrypt::{decrypt, RunSummary};
pub use list::list;
