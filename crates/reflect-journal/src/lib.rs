pub mod entries;
pub mod error;

pub use entries::EntryStore;
pub use error::JournalError;
