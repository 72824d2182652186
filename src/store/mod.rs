pub mod local;
pub mod remote;

pub use local::{FileLocalStore, LegacyEntry, LocalEntryStore};
pub use remote::{PgEntryStore, RemoteEntryStore};
