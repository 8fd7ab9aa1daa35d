//! Benchmarks for the skeleton parser

use criterion::{Criterion, criterion_group, criterion_main};
use std::io::Cursor;

use glam::Mat4;
use sushi_skeleton::{BoneMapping, SkeletonParser, write_skeleton};

fn create_test_file(bone_count: usize) -> Vec<u8> {
    let mut skeleton = BoneMapping::new();
    for ordinal in 0..bone_count {
        let matrix = Mat4::from_translation(glam::Vec3::new(ordinal as f32, 1.5, -0.25));
        skeleton.add_bone(format!("bone_{:04}", ordinal), matrix);
    }

    let mut buffer = Vec::new();
    write_skeleton(&mut buffer, &skeleton).expect("writing to a Vec cannot fail");
    buffer
}

fn bench_parse(c: &mut Criterion) {
    let small = create_test_file(16);
    let large = create_test_file(512);
    let parser = SkeletonParser::new();

    c.bench_function("parse_16_bones", |b| {
        b.iter(|| {
            let skeleton = parser
                .parse(&mut Cursor::new(&small))
                .expect("bench input is valid");
            std::hint::black_box(skeleton);
        });
    });

    c.bench_function("parse_512_bones", |b| {
        b.iter(|| {
            let skeleton = parser
                .parse(&mut Cursor::new(&large))
                .expect("bench input is valid");
            std::hint::black_box(skeleton);
        });
    });
}

fn bench_flatten(c: &mut Criterion) {
    let data = create_test_file(512);
    let skeleton = SkeletonParser::new()
        .parse(&mut Cursor::new(&data))
        .expect("bench input is valid");

    c.bench_function("bone_matrices_512", |b| {
        b.iter(|| std::hint::black_box(skeleton.bone_matrices()));
    });
}

criterion_group!(benches, bench_parse, bench_flatten);
criterion_main!(benches);
