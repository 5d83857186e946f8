mod library;
mod report;

pub use library::{DEFAULT_LIBRARY_FILE, LibraryManager, default_library_path};
pub use report::{DEFAULT_REPORT_FILE, NotFoundReport};
