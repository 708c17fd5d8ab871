// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use voxcad::{export_structure, Cube, Dimensions, ExportFormat, ExportOptions, Structure, Voxel};

const MATERIALS: [&str; 4] = [
    "minecraft:stone",
    "minecraft:redstone_wire",
    "minecraft:redstone_torch",
    "minecraft:glass",
];

/// Solid block of `side`^3 voxels with a repeating material pattern
fn solid_block(side: i32) -> Structure {
    let extent = side as u32;
    let mut structure = Structure::new("bench", Dimensions::new(extent, extent, extent));
    for y in 0..side {
        for z in 0..side {
            for x in 0..side {
                let material = MATERIALS[((x + y + z) as usize) % MATERIALS.len()];
                structure.push(Voxel::new([x, y, z], material));
            }
        }
    }
    structure
}

fn bench_cube(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube");

    group.bench_function("corners_and_faces", |b| {
        b.iter(|| Cube::new(black_box([3, -7, 12])).faces());
    });

    group.finish();
}

fn bench_serializers(c: &mut Criterion) {
    let mut group = c.benchmark_group("serializers");
    let options = ExportOptions::default();

    for side in [4, 8, 16] {
        let structure = solid_block(side);
        group.throughput(Throughput::Elements(structure.voxel_count() as u64));

        for format in ExportFormat::DEFAULT {
            group.bench_with_input(
                BenchmarkId::new(format.extension(), side),
                &structure,
                |b, structure| {
                    b.iter(|| export_structure(black_box(structure), format, &options).unwrap());
                },
            );
        }
    }

    let structure = solid_block(8);
    let binary = ExportOptions {
        stl_binary: true,
        ..ExportOptions::default()
    };
    group.bench_function("stl_binary_8", |b| {
        b.iter(|| export_structure(black_box(&structure), ExportFormat::TriangulatedMesh, &binary).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_cube, bench_serializers);
criterion_main!(benches);
