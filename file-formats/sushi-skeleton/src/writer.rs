//! Writer for SuSkeleton files
//!
//! Serializes a [`BoneMapping`] back to the text format the parser accepts:
//! magic header, bone count, then alternating name and matrix lines.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::parser::SUSKELETON_MAGIC;
use crate::skeleton::BoneMapping;

/// Writes a skeleton in SuSkeleton v2 text form
///
/// The bone count line is derived from the actual bone count, so a mapping
/// parsed from a file with a mismatched declared count is written out
/// consistent.
///
/// # Errors
///
/// Returns [`SkeletonError::Io`](crate::SkeletonError::Io) if writing fails.
pub fn write_skeleton<W: Write>(writer: &mut W, skeleton: &BoneMapping) -> Result<()> {
    writeln!(writer, "{}", SUSKELETON_MAGIC)?;
    writeln!(writer, "{}", skeleton.bone_count())?;

    for bone in skeleton.bones() {
        writeln!(writer, "{}", bone.name)?;
        writeln!(writer, "{}", format_matrix_line(&bone.matrix.to_cols_array()))?;
    }

    Ok(())
}

/// Writes a skeleton to a file on disk
///
/// # Errors
///
/// Returns [`SkeletonError::Io`](crate::SkeletonError::Io) if the file
/// cannot be created or written.
pub fn write_skeleton_file<P: AsRef<Path>>(path: P, skeleton: &BoneMapping) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_skeleton(&mut writer, skeleton)?;
    writer.flush()?;
    Ok(())
}

fn format_matrix_line(values: &[f32; 16]) -> String {
    let mut line = String::new();
    for (position, value) in values.iter().enumerate() {
        if position > 0 {
            line.push(' ');
        }
        // `{}` prints the shortest representation that round-trips.
        let _ = write!(line, "{}", value);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_single_identity_bone() {
        let mut skeleton = BoneMapping::new();
        skeleton.add_bone("root", Mat4::IDENTITY);

        let mut buffer = Vec::new();
        write_skeleton(&mut buffer, &skeleton).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "[SuSkeleton v2]\n1\nroot\n1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1\n"
        );
    }

    #[test]
    fn test_count_line_tracks_actual_bones() {
        let mut skeleton = BoneMapping::new();
        skeleton.add_bone("a", Mat4::IDENTITY);
        skeleton.add_bone("b", Mat4::IDENTITY);

        let mut buffer = Vec::new();
        write_skeleton(&mut buffer, &skeleton).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().nth(1), Some("2"));
    }
}
