//! Parser, validator, and writer for Sushi engine skeleton files.
//!
//! The SuSkeleton v2 format is a line-oriented text serialization of a
//! named, ordered list of bones and their 4x4 transforms, used to drive
//! hair and cloth simulation rigs:
//!
//! ```text
//! [SuSkeleton v2]
//! <bone count>
//! <bone name>
//! <16 floats, column-major>
//! ...
//! ```
//!
//! [`BoneMapping`] is the in-memory representation: insertion-ordered bone
//! records plus a name lookup table, with a flattened column-major matrix
//! export for upload to GPU-visible memory. The [`BoneSkeleton`] trait is
//! the narrow lookup surface handed to external animation consumers.
//!
//! # Examples
//!
//! ```
//! use glam::Mat4;
//! use sushi_skeleton::{BoneMapping, SkeletonParser};
//!
//! let input = "[SuSkeleton v2]\n1\nroot\n1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1\n";
//! let skeleton = SkeletonParser::new()
//!     .parse(&mut std::io::Cursor::new(input))
//!     .unwrap();
//! assert_eq!(skeleton.bone_count(), 1);
//! assert_eq!(skeleton.bone_matrix(0).unwrap(), Mat4::IDENTITY);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod parser;
pub mod skeleton;
pub mod validation;
pub mod writer;

pub use error::{Result, SkeletonError};
pub use parser::{SUSKELETON_MAGIC, SkeletonParser};
pub use skeleton::{Bone, BoneMapping, BoneSkeleton};
pub use validation::validate_skeleton;
pub use writer::{write_skeleton, write_skeleton_file};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
