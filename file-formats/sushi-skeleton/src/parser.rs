//! Parser implementation for SuSkeleton files
//!
//! This module provides the main functionality for reading skeleton files.
//! The [`SkeletonParser`] struct is the primary entry point.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glam::Mat4;

use crate::error::{Result, SkeletonError};
use crate::skeleton::BoneMapping;

/// Magic header line identifying a SuSkeleton v2 file
pub const SUSKELETON_MAGIC: &str = "[SuSkeleton v2]";

/// Number of values in a matrix line
const MATRIX_VALUES: usize = 16;

/// Parser states for the line-oriented skeleton format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Expecting the magic header line
    AwaitMagic,
    /// Expecting the declared bone count
    AwaitCount,
    /// Expecting a bone name, skipping blank lines
    AwaitName,
    /// Expecting a 16-float matrix line for the captured name
    AwaitMatrix,
}

/// Parser for SuSkeleton v2 files
///
/// The format is line-oriented text: a magic header, a declared bone count,
/// then alternating bone-name and matrix lines. Matrix lines hold 16
/// whitespace-separated floats in column-major order.
///
/// The declared count is informational in legacy files and often disagrees
/// with the number of bones actually present. The default parser tolerates
/// a mismatch and logs a warning; [`SkeletonParser::with_strict_count`]
/// turns the mismatch into a hard error.
///
/// # Examples
///
/// ```rust,no_run
/// use std::fs::File;
/// use std::io::BufReader;
/// use sushi_skeleton::parser::SkeletonParser;
///
/// let file = File::open("skeleton.txt").unwrap();
/// let mut reader = BufReader::new(file);
/// let parser = SkeletonParser::new();
/// let skeleton = parser.parse(&mut reader).unwrap();
/// println!("{} bones", skeleton.bone_count());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SkeletonParser {
    strict_count: bool,
}

impl SkeletonParser {
    /// Creates a parser with permissive count handling
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser that rejects files whose declared bone count does
    /// not match the number of bones present
    pub fn with_strict_count() -> Self {
        Self { strict_count: true }
    }

    /// Parses a skeleton from a buffered reader
    ///
    /// # Errors
    ///
    /// - [`SkeletonError::InvalidMagic`] if the first line is not the
    ///   SuSkeleton v2 header.
    /// - [`SkeletonError::Parse`] for a malformed count or matrix line,
    ///   or a count mismatch in strict mode.
    /// - [`SkeletonError::Truncated`] if input ends before the header
    ///   completes or in the middle of a name/matrix pair.
    /// - [`SkeletonError::Io`] if reading fails.
    pub fn parse<R: BufRead>(&self, reader: &mut R) -> Result<BoneMapping> {
        let mut skeleton = BoneMapping::new();
        let mut state = State::AwaitMagic;
        let mut bone_name = String::new();
        let mut count_line = 0;
        let mut line_number = 0;

        for line in reader.lines() {
            let line = line?;
            line_number += 1;

            match state {
                State::AwaitMagic => {
                    if line.starts_with(SUSKELETON_MAGIC) {
                        state = State::AwaitCount;
                    } else {
                        return Err(SkeletonError::InvalidMagic {
                            expected: SUSKELETON_MAGIC.to_string(),
                            found: line,
                        });
                    }
                }
                State::AwaitCount => {
                    let count =
                        line.trim()
                            .parse::<u64>()
                            .map_err(|err| SkeletonError::Parse {
                                line: line_number,
                                message: format!("invalid bone count '{}': {}", line.trim(), err),
                            })?;
                    skeleton.set_declared_count(count);
                    count_line = line_number;
                    state = State::AwaitName;
                }
                State::AwaitName => {
                    // Blank lines between bone entries are allowed.
                    if !line.trim().is_empty() {
                        bone_name = line.trim().to_string();
                        state = State::AwaitMatrix;
                    }
                }
                State::AwaitMatrix => {
                    let matrix = parse_matrix_line(&line, line_number)?;
                    skeleton.add_bone(std::mem::take(&mut bone_name), matrix);
                    state = State::AwaitName;
                }
            }
        }

        if state != State::AwaitName {
            return Err(SkeletonError::Truncated {
                line: line_number + 1,
            });
        }

        self.check_count(&skeleton, count_line)?;
        Ok(skeleton)
    }

    /// Parses a skeleton file from disk
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::Io`] if the file cannot be opened, or any
    /// error [`parse`](Self::parse) can produce.
    pub fn parse_path<P: AsRef<Path>>(&self, path: P) -> Result<BoneMapping> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        self.parse(&mut reader)
    }

    fn check_count(&self, skeleton: &BoneMapping, count_line: usize) -> Result<()> {
        let Some(declared) = skeleton.declared_count() else {
            return Ok(());
        };
        let actual = skeleton.bone_count() as u64;
        if declared == actual {
            return Ok(());
        }
        if self.strict_count {
            return Err(SkeletonError::Parse {
                line: count_line,
                message: format!("declared bone count {} but file holds {}", declared, actual),
            });
        }
        log::warn!(
            "skeleton declares {} bones but holds {}; keeping parsed bones",
            declared,
            actual
        );
        Ok(())
    }
}

/// Parses one matrix line: 16 whitespace-separated floats, column-major
fn parse_matrix_line(line: &str, line_number: usize) -> Result<Mat4> {
    let mut values = [0.0f32; MATRIX_VALUES];
    let mut tokens = line.split_whitespace();

    for (position, value) in values.iter_mut().enumerate() {
        let token = tokens.next().ok_or(SkeletonError::Parse {
            line: line_number,
            message: format!("expected {} matrix values, found {}", MATRIX_VALUES, position),
        })?;
        *value = token.parse::<f32>().map_err(|err| SkeletonError::Parse {
            line: line_number,
            message: format!("invalid matrix value '{}': {}", token, err),
        })?;
    }

    Ok(Mat4::from_cols_array(&values))
}
