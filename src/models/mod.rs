//! Plain data carried through the report pipeline.
//!
//! - `commit`: CommitRecord parsed from one line of `git log` output
//! - `report`: DiffSegment per adjacent commit pair, Report as their concatenation

pub mod commit;
pub mod report;

pub use commit::*;
pub use report::*;
