//! named-regexp core library
//!
//! The pattern transformer behind named capture groups: strips `(?<name>...)`
//! annotations down to plain capturing groups and records which 1-based group
//! index each name refers to.

pub mod error;
pub mod groups;
pub mod transform;

pub use error::{Result, TransformError};
pub use groups::{GroupIndices, GroupInfo, Iter};
pub use transform::{Transformed, transform};
