//! Skeleton file command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use sushi_skeleton::validation::{duplicate_names, validate_skeleton};
use sushi_skeleton::{BoneMapping, SkeletonParser, write_skeleton_file};

#[derive(Subcommand)]
pub enum SkeletonCommands {
    /// Display information about a skeleton file
    Info {
        /// Path to the skeleton file
        file: PathBuf,
    },

    /// Validate a skeleton file
    Validate {
        /// Path to the skeleton file
        file: PathBuf,

        /// Reject files whose declared bone count does not match the bones present
        #[arg(long)]
        strict_count: bool,
    },

    /// List the bones in a skeleton file
    Bones {
        /// Path to the skeleton file
        file: PathBuf,
    },

    /// Dump the flattened bone matrix buffer
    Matrices {
        /// Path to the skeleton file
        file: PathBuf,

        /// Only dump the matrix of the named bone
        #[arg(long, value_name = "NAME")]
        bone: Option<String>,
    },

    /// Rewrite a skeleton file in normalized form
    ///
    /// Parses permissively and writes the result back out with a corrected
    /// bone count line.
    Convert {
        /// Path to the input skeleton file
        input: PathBuf,

        /// Path to write the normalized skeleton file
        output: PathBuf,
    },
}

pub fn execute(command: SkeletonCommands) -> Result<()> {
    match command {
        SkeletonCommands::Info { file } => execute_info(file),
        SkeletonCommands::Validate { file, strict_count } => execute_validate(file, strict_count),
        SkeletonCommands::Bones { file } => execute_bones(file),
        SkeletonCommands::Matrices { file, bone } => execute_matrices(file, bone),
        SkeletonCommands::Convert { input, output } => execute_convert(input, output),
    }
}

fn parse_skeleton(path: &PathBuf, strict_count: bool) -> Result<BoneMapping> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let parser = if strict_count {
        SkeletonParser::with_strict_count()
    } else {
        SkeletonParser::new()
    };

    parser
        .parse(&mut reader)
        .with_context(|| format!("Failed to parse skeleton file: {}", path.display()))
}

fn execute_info(path: PathBuf) -> Result<()> {
    use console::style;

    let skeleton = parse_skeleton(&path, false)?;

    println!("Skeleton: {}", style(path.display()).cyan());
    println!("  Bones: {}", style(skeleton.bone_count()).yellow());
    if let Some(declared) = skeleton.declared_count() {
        if declared == skeleton.bone_count() as u64 {
            println!("  Declared count: {}", declared);
        } else {
            println!(
                "  Declared count: {} ({})",
                declared,
                style("mismatch").red()
            );
        }
    }

    let duplicates = duplicate_names(&skeleton);
    if !duplicates.is_empty() {
        println!("  Duplicate names: {}", style(duplicates.len()).red());
        for (name, indices) in duplicates {
            println!("    '{}' at indices {:?}", name, indices);
        }
    }

    Ok(())
}

fn execute_validate(path: PathBuf, strict_count: bool) -> Result<()> {
    use console::style;

    let skeleton = parse_skeleton(&path, strict_count)?;

    match validate_skeleton(&skeleton) {
        Ok(()) => {
            println!(
                "✓ Skeleton file '{}' is valid ({} bones)",
                style(path.display()).cyan(),
                style(skeleton.bone_count()).yellow()
            );
            Ok(())
        }
        Err(err) => anyhow::bail!("Validation failed: {}", err),
    }
}

fn execute_bones(path: PathBuf) -> Result<()> {
    let skeleton = parse_skeleton(&path, false)?;

    for (index, bone) in skeleton.bones().iter().enumerate() {
        println!("{:4}  {}", index, bone.name);
    }

    Ok(())
}

fn execute_matrices(path: PathBuf, bone: Option<String>) -> Result<()> {
    let skeleton = parse_skeleton(&path, false)?;

    match bone {
        Some(name) => {
            let index = skeleton
                .bone_index(&name)
                .with_context(|| format!("No bone named '{}' in {}", name, path.display()))?;
            let matrix = skeleton.bone_matrix(index)?;
            print_matrix(&name, index, &matrix.to_cols_array());
        }
        None => {
            for (index, bone) in skeleton.bones().iter().enumerate() {
                print_matrix(&bone.name, index, &bone.matrix.to_cols_array());
            }
        }
    }

    Ok(())
}

fn print_matrix(name: &str, index: usize, values: &[f32; 16]) {
    println!("{:4}  {}", index, name);
    for row in 0..4 {
        // Values are stored column-major; print row by row for readability.
        println!(
            "      {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
            values[row],
            values[4 + row],
            values[8 + row],
            values[12 + row]
        );
    }
}

fn execute_convert(input: PathBuf, output: PathBuf) -> Result<()> {
    use console::style;

    let skeleton = parse_skeleton(&input, false)?;

    write_skeleton_file(&output, &skeleton)
        .with_context(|| format!("Failed to write skeleton file: {}", output.display()))?;

    println!(
        "✓ Wrote {} bones to {}",
        style(skeleton.bone_count()).yellow(),
        style(output.display()).green()
    );

    Ok(())
}
