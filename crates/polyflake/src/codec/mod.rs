mod crockford;
mod error;
mod extract;
mod hex;

pub use crockford::*;
pub use error::*;
pub use extract::*;
pub use hex::*;
