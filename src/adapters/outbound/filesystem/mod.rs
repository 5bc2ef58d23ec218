/// Filesystem adapters for file I/O operations
mod event_feed;
mod file_writer;

pub use event_feed::JsonEventFeed;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
