mod record;
mod walker;

pub use record::{EntryMeta, EntryStat, ScanEntry, UnixTime};
pub use walker::Walker;
