use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Mat4, Vec2, Vec3};
use sprite_particles::particle_engine::{
    AlphaModifier, DirectionModifier, GameTime, LifetimeModifier, ParticleEmitter, SpreadModifier,
    TextureModifier,
};
use sprite_particles::renderer_engine::{
    BufferHandle, Color, GpuBackend, RenderError, Resolution, SpriteBatch, SpriteDraw, Texture2D,
    VertexAttribute,
};
use std::hint::black_box;

/// Backend sans effet : mesure le coût CPU du batch seul.
#[derive(Default)]
struct NullBackend {
    next: u32,
    uploaded_bytes: usize,
}

impl GpuBackend for NullBackend {
    fn create_vertex_buffer(&mut self, _byte_capacity: usize) -> Result<BufferHandle, RenderError> {
        self.next += 1;
        Ok(BufferHandle(self.next))
    }

    fn create_index_buffer(&mut self, _indices: &[u32]) -> Result<BufferHandle, RenderError> {
        self.next += 1;
        Ok(BufferHandle(self.next))
    }

    fn upload_vertices(&mut self, _buffer: BufferHandle, bytes: &[u8]) {
        self.uploaded_bytes += black_box(bytes).len();
    }

    fn bind_attribute(&mut self, _buffer: BufferHandle, _attribute: VertexAttribute) {}

    fn bind_texture(&mut self, _texture: &Texture2D) {}

    fn set_view_projection(&mut self, _view_projection: &Mat4) {}

    fn draw_indexed(&mut self, _index_buffer: BufferHandle, _index_count: usize) {}
}

fn null_batch(max_quads: usize) -> SpriteBatch<NullBackend> {
    SpriteBatch::new(NullBackend::default(), Resolution::new(1024, 800), max_quads).unwrap()
}

fn sprites(count: usize, textures: u32) -> Vec<SpriteDraw> {
    (0..count)
        .map(|i| {
            let texture = Texture2D::from_gpu(i as u32 % textures, 16, 16);
            let position = Vec2::new((i % 64) as f32 * 16.0, (i / 64) as f32 * 16.0);
            SpriteDraw {
                rotation: i as f32 * 0.01,
                ..SpriteDraw::at(texture, position, Color::ONE)
            }
        })
        .collect()
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("sprite_batch");

    for &(count, textures) in &[(1_000, 1), (10_000, 1), (10_000, 8)] {
        let draws = sprites(count, textures);
        // textures groupées, comme après le tri d'un émetteur
        let mut sorted = draws.clone();
        sorted.sort_by_key(|s| s.texture.id());

        group.bench_with_input(
            BenchmarkId::new(format!("{textures}_textures"), count),
            &sorted,
            |b, draws| {
                let mut batch = null_batch(2048);
                b.iter(|| {
                    batch.begin_default().unwrap();
                    for sprite in draws {
                        batch.draw(black_box(sprite)).unwrap();
                    }
                    batch.end().unwrap();
                    black_box(batch.stats())
                })
            },
        );
    }

    group.finish();
}

fn bench_emitter(c: &mut Criterion) {
    let textures: Vec<Texture2D> = (0..4).map(|i| Texture2D::from_gpu(i, 8, 8)).collect();
    let mut emitter = ParticleEmitter::new(Vec3::new(512.0, 400.0, 0.0)).with_seed(1);
    emitter.set_amount(5_000.0).set_speed(120.0).set_lifetime(2.0).start();
    emitter.add_modifier(Box::new(TextureModifier::new(textures)));
    emitter.add_modifier(Box::new(SpreadModifier::both(40.0)));
    emitter.add_modifier(Box::new(DirectionModifier::new(Vec3::new(0.0, -1.0, 0.0))));
    emitter.add_modifier(Box::new(AlphaModifier::new(0.5)));
    emitter.add_modifier(Box::new(LifetimeModifier::random_multiply()));

    // régime établi
    let mut time = GameTime::default();
    let step = std::time::Duration::from_micros(16_667);
    for _ in 0..180 {
        time = time.advance(step);
        emitter.update(&time);
    }

    let mut batch = null_batch(2048);
    c.bench_function("emitter_update_and_draw", |b| {
        b.iter(|| {
            time = time.advance(step);
            emitter.update(black_box(&time));
            black_box(emitter.draw(&mut batch).unwrap())
        })
    });
}

criterion_group!(benches, bench_batch, bench_emitter);
criterion_main!(benches);
