pub mod config_io;
pub mod recovery;
pub mod state;
pub mod store;

pub use store::{Store, StoreError};
