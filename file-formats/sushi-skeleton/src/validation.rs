//! Validation functions for skeleton data
//!
//! The parser is deliberately permissive about inconsistencies that legacy
//! files exhibit; this module turns them into explicit errors for callers
//! that want a well-formed skeleton before handing it to an animation
//! consumer.

use std::collections::HashMap;

use crate::error::{Result, SkeletonError};
use crate::skeleton::BoneMapping;

/// Validates a skeleton for consistency
///
/// Checks, in order:
/// - every bone has a non-empty name,
/// - no two bones share a name (a shared name leaves the earlier bone
///   unreachable by name lookup),
/// - the declared header count, when present, matches the actual bone
///   count.
///
/// # Errors
///
/// Returns [`SkeletonError::Validation`] describing the first failed check.
pub fn validate_skeleton(skeleton: &BoneMapping) -> Result<()> {
    validate_names(skeleton)?;
    validate_declared_count(skeleton)?;
    Ok(())
}

/// Returns the names that appear on more than one bone, with the indices
/// that carry them
pub fn duplicate_names(skeleton: &BoneMapping) -> Vec<(String, Vec<usize>)> {
    let mut seen: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, bone) in skeleton.bones().iter().enumerate() {
        seen.entry(bone.name.as_str()).or_default().push(index);
    }

    let mut duplicates: Vec<(String, Vec<usize>)> = seen
        .into_iter()
        .filter(|(_, indices)| indices.len() > 1)
        .map(|(name, indices)| (name.to_string(), indices))
        .collect();
    duplicates.sort();
    duplicates
}

fn validate_names(skeleton: &BoneMapping) -> Result<()> {
    for (index, bone) in skeleton.bones().iter().enumerate() {
        if bone.name.is_empty() {
            return Err(SkeletonError::Validation(format!(
                "bone {} has an empty name",
                index
            )));
        }
    }

    let duplicates = duplicate_names(skeleton);
    if let Some((name, indices)) = duplicates.first() {
        return Err(SkeletonError::Validation(format!(
            "duplicate bone name '{}' at indices {:?}",
            name, indices
        )));
    }

    Ok(())
}

fn validate_declared_count(skeleton: &BoneMapping) -> Result<()> {
    if let Some(declared) = skeleton.declared_count() {
        let actual = skeleton.bone_count() as u64;
        if declared != actual {
            return Err(SkeletonError::Validation(format!(
                "declared bone count {} does not match actual count {}",
                declared, actual
            )));
        }
    }
    Ok(())
}
