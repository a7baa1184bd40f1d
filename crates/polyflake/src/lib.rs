#![doc = include_str!("../README.md")]

pub mod codec;
mod config;
mod error;
mod format;
mod generator;
mod sequence;
mod time;

pub use crate::codec::{DecodeError, IdParts};
pub use crate::config::*;
pub use crate::error::*;
pub use crate::format::*;
pub use crate::generator::*;
pub use crate::time::*;
