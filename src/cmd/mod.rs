pub mod init;
pub mod list;
pub mod ranges;
pub mod root;
pub mod stats;
pub mod toggle;
