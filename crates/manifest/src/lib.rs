mod attrs;
mod path;
mod time;
mod writer;

pub use attrs::{FileAttributes, derive_attributes};
pub use path::windows_path;
pub use time::windows_time;
pub use writer::scan_root;
