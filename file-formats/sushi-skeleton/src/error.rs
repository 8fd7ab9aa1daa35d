//! Error handling for skeleton parsing

use std::io;
use thiserror::Error;

/// Errors that can occur when working with SuSkeleton files
#[derive(Debug, Error)]
pub enum SkeletonError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic value in the file header
    #[error("Invalid magic value: expected '{expected}', found '{found}'")]
    InvalidMagic {
        /// The expected magic value
        expected: String,
        /// The actual magic value found
        found: String,
    },

    /// Error when parsing skeleton data
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending line
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// The file ended in the middle of a bone entry or before the header completed
    #[error("Truncated skeleton file at line {line}")]
    Truncated {
        /// 1-based line number where input ran out
        line: usize,
    },

    /// A bone name lookup found no matching bone
    #[error("Bone not found: '{0}'")]
    BoneNotFound(String),

    /// A bone index lookup was beyond the bone count
    #[error("Bone index out of range: {index} (bone count: {count})")]
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// The current bone count
        count: usize,
    },

    /// The bone count does not fit the 32-bit interface boundary
    #[error("Bone count {0} exceeds the 32-bit interface limit")]
    BoneCountOverflow(usize),

    /// Data validation failed
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Type alias for Results from skeleton operations
pub type Result<T> = std::result::Result<T, SkeletonError>;
