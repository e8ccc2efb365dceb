mod collection;
pub mod models;
mod progress;

#[cfg(test)]
pub(crate) mod fixtures;

pub use collection::GameCollection;
pub use models::*;
pub use progress::ParseProgress;
