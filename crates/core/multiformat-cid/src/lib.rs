//! Multihash digest containers and content identifiers
//!
//! Builds on `multiformat-encoding` for the text layer and multicodec table.

pub mod cid;
pub mod multihash;

pub use cid::{Cid, Version};
pub use multihash::Multihash;

mod error;
pub use error::{CidError, Result};
