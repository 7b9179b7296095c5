//! # Command Batching Benchmark
//!
//! Converts synthetic frames into vertex streams. The mix mimics a busy
//! form: fills, outlines and glyph quads, with a clip change every row.
//!
//! Run with: `cargo bench --package sgui_render`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sgui_render::{BatchRenderer, SoftwareRenderer};
use sgui_ui::{Color, Command, Rect, TextureId};

#[allow(clippy::cast_precision_loss)]
fn synthetic_frame(rows: usize, texture: TextureId) -> Vec<Command> {
    let mut commands = Vec::with_capacity(rows * 24);
    for row in 0..rows {
        let y = (row % 40) as f32 * 20.0;
        let line = Rect::new(0.0, y, 800.0, 20.0);
        commands.push(Command::SetClip { rect: line });
        commands.push(Command::FillRect {
            rect: line,
            color: Color::hex(0x2A2A30FF),
        });
        commands.push(Command::DrawRect {
            rect: line,
            color: Color::hex(0x50505AFF),
        });
        for glyph in 0..20 {
            commands.push(Command::DrawImage {
                texture,
                src: Rect::new(8.0, 12.0, 8.0, 12.0),
                dst: Rect::new(4.0 + glyph as f32 * 8.0, y + 4.0, 8.0, 12.0),
                color: Color::WHITE,
            });
        }
        commands.push(Command::UnsetClip);
    }
    commands
}

fn bench_batching(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_build");
    for rows in [10usize, 100, 1_000] {
        let mut renderer = BatchRenderer::new();
        let texture = renderer
            .register_texture(&vec![0; 128 * 192 * 4], 128, 192)
            .expect("font-sized texture");
        let frame = synthetic_frame(rows, texture);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &frame, |b, frame| {
            b.iter(|| {
                renderer.build(frame, 800.0, 800.0);
                black_box(renderer.stats())
            });
        });
    }
    group.finish();
}

fn bench_software_raster(c: &mut Criterion) {
    let mut renderer = SoftwareRenderer::new(800, 800);
    let texture = renderer
        .register_texture(&vec![255; 128 * 192 * 4], 128, 192)
        .expect("font-sized texture");
    let frame = synthetic_frame(40, texture);
    c.bench_function("software_raster_40_rows", |b| {
        b.iter(|| {
            renderer.clear(Color::BLACK);
            renderer.rasterize(black_box(&frame));
        });
    });
}

criterion_group!(benches, bench_batching, bench_software_raster);
criterion_main!(benches);
