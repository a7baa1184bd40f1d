mod api;
mod lock;
mod registry;

pub use lock::*;
pub use registry::*;
