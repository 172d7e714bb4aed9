//! View access benchmarks.
//!
//! - Layout resolution for a mid-sized nested schema
//! - View binding (eager nested and array sub-views)
//! - Scalar and vector field get/set through a bound view

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use struct_buffer_core::types::{float32, mat4f, uint32, vec3f, vec4f};
use struct_buffer_core::{array_of, struct_of, Schema, StructDescriptor};

/// Creates a scene struct with `count` array elements.
fn scene_descriptor(count: usize) -> StructDescriptor {
    let light = struct_of(
        Schema::named("Light")
            .field("color", vec3f())
            .field("intensity", float32())
            .field("position", vec4f()),
    )
    .expect("light layout");
    struct_of(
        Schema::named("Scene")
            .field("id", uint32())
            .field("view", mat4f())
            .field("lights", array_of(&light, count).expect("light array")),
    )
    .expect("scene layout")
}

fn benchmark_resolve(c: &mut Criterion) {
    c.bench_function("resolve_scene_schema", |b| {
        b.iter(|| black_box(scene_descriptor(black_box(16))))
    });
}

fn benchmark_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_view");
    for count in [1usize, 16, 256] {
        let descriptor = scene_descriptor(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &descriptor, |b, d| {
            b.iter(|| black_box(d.create()))
        });
    }
    group.finish();
}

fn benchmark_field_access(c: &mut Criterion) {
    let view = scene_descriptor(16).create();

    c.bench_function("scalar_set_get", |b| {
        let mut n = 0u32;
        b.iter(|| {
            n = n.wrapping_add(1);
            view.set("id", n).expect("set id");
            black_box(view.get("id").expect("get id"))
        })
    });

    c.bench_function("array_vector_write", |b| {
        let lights = view.array("lights").expect("lights");
        b.iter(|| {
            for light in lights {
                light
                    .set_vector("color", black_box(&[0.5f32, 0.25, 1.0]))
                    .expect("set color");
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_resolve,
    benchmark_create,
    benchmark_field_access
);
criterion_main!(benches);
