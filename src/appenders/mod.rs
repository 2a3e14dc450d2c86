//! Appender implementations

pub mod callback;
pub mod console;
pub mod file;
pub mod writer;

pub use callback::FnAppender;
pub use console::ConsoleAppender;
pub use file::FileAppender;
pub use writer::{MemoryAppender, WriterAppender};

pub use crate::core::Appender;
