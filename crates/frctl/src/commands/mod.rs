//! Repository-level commands that run before an [`App`](crate::app::App)
//! can be opened.

pub mod init;
