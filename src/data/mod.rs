pub mod app_settings;
pub mod catalog;
pub mod climb_state;
pub mod climb_store;
pub mod peak;
pub mod persistence;

pub use app_settings::{AppSettings, MapSettings};
pub use catalog::Catalog;
pub use climb_state::ClimbState;
#[cfg(test)]
pub use climb_store::MemoryStorage;
pub use climb_store::{ClimbStorage, ClimbStore, FileStorage};
pub use peak::{Difficulty, Peak};
pub use persistence::Persistable;
