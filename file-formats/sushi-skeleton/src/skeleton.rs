//! The bone mapping data structure
//!
//! [`BoneMapping`] owns the mapping between bone names and indices, the
//! per-bone transform matrices, and the flattened export buffer handed to
//! renderers. It can be populated programmatically with [`BoneMapping::add_bone`]
//! or from a SuSkeleton file with [`BoneMapping::load_skeleton_file`].

use std::collections::HashMap;
use std::path::Path;

use glam::Mat4;

use crate::error::{Result, SkeletonError};
use crate::parser::SkeletonParser;

/// A named bone and its 4x4 transform
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    /// Bone name, unique within a well-formed skeleton
    pub name: String,
    /// Column-major 4x4 transform
    pub matrix: Mat4,
}

/// Mapping between bone names, bone indices, and bone transforms
///
/// Bones are stored in insertion order; the index assigned to a bone is its
/// position in that order (0-based, contiguous, never reused). A name lookup
/// table is kept in sync with the record list on every insertion. There is no
/// removal operation; once loaded, a skeleton is read-only for the rest of a
/// session.
///
/// # Examples
///
/// ```
/// use glam::Mat4;
/// use sushi_skeleton::BoneMapping;
///
/// let mut skeleton = BoneMapping::new();
/// let root = skeleton.add_bone("root", Mat4::IDENTITY);
/// assert_eq!(root, 0);
/// assert_eq!(skeleton.bone_count(), 1);
/// assert_eq!(skeleton.bone_index("root").unwrap(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoneMapping {
    bones: Vec<Bone>,
    indices: HashMap<String, usize>,
    declared_count: Option<u64>,
}

impl BoneMapping {
    /// Creates an empty bone mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a bone mapping from a skeleton file
    ///
    /// Convenience wrapper around [`SkeletonParser::parse_path`] with the
    /// default (permissive) parser settings.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        SkeletonParser::new().parse_path(path)
    }

    /// Appends a bone and returns its assigned index
    ///
    /// The returned index equals the bone count before the insertion. Bone
    /// names are not checked for uniqueness: inserting a duplicate name
    /// appends a new record but repoints the name lookup at the new index,
    /// leaving the older record reachable only by index. This matches the
    /// permissive file format, and is reported by
    /// [`validate_skeleton`](crate::validation::validate_skeleton).
    pub fn add_bone(&mut self, name: impl Into<String>, matrix: Mat4) -> usize {
        let name = name.into();
        let index = self.bones.len();
        if let Some(previous) = self.indices.insert(name.clone(), index) {
            log::warn!(
                "duplicate bone name '{}': index {} shadows index {}",
                name,
                index,
                previous
            );
        }
        self.bones.push(Bone { name, matrix });
        index
    }

    /// Returns the number of bones
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Returns `true` if the mapping holds no bones
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Returns the bones in index order
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Returns the bone count declared in the source file header, if this
    /// mapping was produced by the parser
    ///
    /// The declared count is informational; it can disagree with
    /// [`bone_count`](Self::bone_count) in permissively parsed files.
    pub fn declared_count(&self) -> Option<u64> {
        self.declared_count
    }

    pub(crate) fn set_declared_count(&mut self, count: u64) {
        self.declared_count = Some(count);
    }

    /// Looks up a bone index by name
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::BoneNotFound`] if no bone has that name.
    pub fn bone_index(&self, name: &str) -> Result<usize> {
        self.indices
            .get(name)
            .copied()
            .ok_or_else(|| SkeletonError::BoneNotFound(name.to_string()))
    }

    /// Looks up a bone name by index
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::IndexOutOfRange`] if `index` is at or beyond
    /// the bone count.
    pub fn bone_name(&self, index: usize) -> Result<&str> {
        self.bones
            .get(index)
            .map(|bone| bone.name.as_str())
            .ok_or(SkeletonError::IndexOutOfRange {
                index,
                count: self.bones.len(),
            })
    }

    /// Returns the transform of the bone at `index`
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::IndexOutOfRange`] if `index` is at or beyond
    /// the bone count.
    pub fn bone_matrix(&self, index: usize) -> Result<Mat4> {
        self.bones
            .get(index)
            .map(|bone| bone.matrix)
            .ok_or(SkeletonError::IndexOutOfRange {
                index,
                count: self.bones.len(),
            })
    }

    /// Flattens all bone transforms into a single float buffer
    ///
    /// The buffer holds 16 floats per bone in column-major order (column 0
    /// rows 0-3, then column 1, and so on), concatenated in bone index
    /// order. The total length is `16 * bone_count()`. Consumers uploading
    /// the buffer to GPU-visible memory get the full 4x4 matrix per bone.
    pub fn bone_matrices(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.bones.len() * 16);
        for bone in &self.bones {
            flat.extend_from_slice(&bone.matrix.to_cols_array());
        }
        flat
    }

    /// Replaces this mapping with the contents of a skeleton file
    ///
    /// The file is parsed into a fresh mapping first and installed only on
    /// success, so a failed load leaves the previous state untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::Io`] if the file cannot be opened or read,
    /// or a parse error describing the malformed input.
    pub fn load_skeleton_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let loaded = SkeletonParser::new().parse_path(path)?;
        *self = loaded;
        Ok(())
    }
}

/// Narrow lookup capability handed to external animation consumers
///
/// Counts and indices cross this boundary as `u32`; a skeleton larger than
/// `u32::MAX` bones surfaces [`SkeletonError::BoneCountOverflow`] rather
/// than truncating silently.
pub trait BoneSkeleton {
    /// Looks up a bone index by name
    fn bone_index_by_name(&self, name: &str) -> Result<u32>;

    /// Looks up a bone name by index
    fn bone_name_by_index(&self, index: u32) -> Result<&str>;

    /// Returns the number of bones
    fn number_of_bones(&self) -> Result<u32>;
}

impl BoneSkeleton for BoneMapping {
    fn bone_index_by_name(&self, name: &str) -> Result<u32> {
        let index = self.bone_index(name)?;
        u32::try_from(index).map_err(|_| SkeletonError::BoneCountOverflow(index))
    }

    fn bone_name_by_index(&self, index: u32) -> Result<&str> {
        self.bone_name(index as usize)
    }

    fn number_of_bones(&self) -> Result<u32> {
        let count = self.bones.len();
        u32::try_from(count).map_err(|_| SkeletonError::BoneCountOverflow(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::from_translation(glam::Vec3::new(x, y, z))
    }

    #[test]
    fn test_add_bone_assigns_sequential_indices() {
        let mut skeleton = BoneMapping::new();
        assert_eq!(skeleton.add_bone("root", Mat4::IDENTITY), 0);
        assert_eq!(skeleton.add_bone("spine", translation(0.0, 1.0, 0.0)), 1);
        assert_eq!(skeleton.add_bone("head", translation(0.0, 2.0, 0.0)), 2);
        assert_eq!(skeleton.bone_count(), 3);
    }

    #[test]
    fn test_lookup_round_trip() {
        let mut skeleton = BoneMapping::new();
        skeleton.add_bone("root", Mat4::IDENTITY);
        skeleton.add_bone("spine", Mat4::IDENTITY);
        skeleton.add_bone("head", Mat4::IDENTITY);

        for index in 0..skeleton.bone_count() {
            let name = skeleton.bone_name(index).unwrap().to_string();
            assert_eq!(skeleton.bone_index(&name).unwrap(), index);
        }
    }

    #[test]
    fn test_lookup_failures() {
        let mut skeleton = BoneMapping::new();
        skeleton.add_bone("root", Mat4::IDENTITY);

        assert!(matches!(
            skeleton.bone_index("missing"),
            Err(SkeletonError::BoneNotFound(name)) if name == "missing"
        ));
        assert!(matches!(
            skeleton.bone_name(1),
            Err(SkeletonError::IndexOutOfRange { index: 1, count: 1 })
        ));
        assert!(matches!(
            skeleton.bone_matrix(1),
            Err(SkeletonError::IndexOutOfRange { index: 1, count: 1 })
        ));
    }

    #[test]
    fn test_bone_matrices_layout() {
        let mut skeleton = BoneMapping::new();
        let first = translation(1.0, 2.0, 3.0);
        let second = Mat4::from_scale(glam::Vec3::splat(2.0));
        skeleton.add_bone("root", first);
        skeleton.add_bone("spine", second);

        let flat = skeleton.bone_matrices();
        assert_eq!(flat.len(), 32);
        assert_eq!(&flat[..16], &first.to_cols_array());
        assert_eq!(&flat[16..], &second.to_cols_array());

        // Column-major: the translation lives in column 3, rows 0-2.
        assert_eq!(flat[12], 1.0);
        assert_eq!(flat[13], 2.0);
        assert_eq!(flat[14], 3.0);
        assert_eq!(flat[15], 1.0);
    }

    #[test]
    fn test_duplicate_name_shadows_earlier_index() {
        let mut skeleton = BoneMapping::new();
        skeleton.add_bone("root", Mat4::IDENTITY);
        skeleton.add_bone("twin", Mat4::IDENTITY);
        skeleton.add_bone("twin", Mat4::IDENTITY);

        assert_eq!(skeleton.bone_count(), 3);
        assert_eq!(skeleton.bone_index("twin").unwrap(), 2);
        assert_eq!(skeleton.bone_name(1).unwrap(), "twin");
    }

    #[test]
    fn test_interface_uses_u32() {
        let mut skeleton = BoneMapping::new();
        skeleton.add_bone("root", Mat4::IDENTITY);

        let interface: &dyn BoneSkeleton = &skeleton;
        assert_eq!(interface.number_of_bones().unwrap(), 1);
        assert_eq!(interface.bone_index_by_name("root").unwrap(), 0);
        assert_eq!(interface.bone_name_by_index(0).unwrap(), "root");
        assert!(interface.bone_name_by_index(1).is_err());
    }
}
