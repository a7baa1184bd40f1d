mod interface;
mod mono_clock;
mod tick;

pub use interface::*;
pub use mono_clock::*;
pub use tick::*;
