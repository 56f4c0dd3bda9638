use anyhow::{anyhow, Result};
use glam::{Vec3, Vec4};
use glfw::{Action, Context, Key, WindowEvent};
use log::{info, warn};
use std::rc::Rc;
use std::time::Instant;

use sprite_particles::particle_engine::{
    AlphaModifier, ColorModifier, DirectionModifier, EmitterConfig, GameTime, LifetimeModifier,
    ParticleEmitter, SpreadModifier, TextureModifier,
};
use sprite_particles::renderer_engine::tools::{setup_opengl_debug, show_opengl_context_info};
use sprite_particles::renderer_engine::{GlBackend, RendererConfig, SpriteBatch, TextureFactory};
use sprite_particles::utils::show_rust_core_dependencies;

/// Démo : un émetteur au centre de la fenêtre. `Espace` démarre/arrête, `Échap` quitte.
fn main() -> Result<()> {
    env_logger::init();

    info!("🚀 Starting Sprite Particles demo...");

    show_rust_core_dependencies();

    let renderer_config =
        RendererConfig::from_file("assets/config/renderer.toml").unwrap_or_default();
    info!("Renderer config loaded:\n{:#?}", renderer_config);
    let emitter_config = EmitterConfig::from_file("assets/config/emitter.toml").unwrap_or_default();
    info!("Emitter config loaded:\n{:#?}", emitter_config);

    // --------------------------
    // Fenêtre & contexte
    // --------------------------
    let mut glfw =
        glfw::init(glfw::fail_on_errors).map_err(|_| anyhow!("Impossible d'initialiser GLFW"))?;
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
        glfw::OpenGlProfileHint::Core,
    ));

    let (mut window, events) = glfw
        .create_window(
            renderer_config.window_width,
            renderer_config.window_height,
            &renderer_config.title,
            glfw::WindowMode::Windowed,
        )
        .ok_or_else(|| anyhow!("Erreur création fenêtre GLFW"))?;
    window.make_current();
    window.set_key_polling(true);

    gl::load_with(|s| window.get_proc_address(s) as *const _);
    unsafe {
        show_opengl_context_info();
        setup_opengl_debug();
    }
    info!("✅ OpenGL context ready for '{}'", renderer_config.title);

    // --------------------------
    // Renderer & émetteur
    // --------------------------
    let backend = unsafe { GlBackend::new()? };
    let factory = backend.texture_factory();
    let mut batch = SpriteBatch::new(
        backend,
        renderer_config.resolution(),
        renderer_config.max_quads,
    )?;

    let center = Vec3::new(
        renderer_config.window_width as f32 / 2.0,
        renderer_config.window_height as f32 / 2.0,
        0.0,
    );
    let mut emitter = ParticleEmitter::from_config(&emitter_config, center);
    emitter.add_modifier(Box::new(ColorModifier::new(
        4,
        4,
        Vec4::new(1.0, 0.6, 0.2, 1.0),
        Rc::new(factory) as Rc<dyn TextureFactory>,
    )));
    match factory.load_file("assets/textures/spark.png") {
        Ok(spark) => {
            emitter.add_modifier(Box::new(TextureModifier::new(vec![spark])));
        }
        Err(err) => warn!("⚠️ {err}, keeping solid particles"),
    }
    emitter.add_modifier(Box::new(SpreadModifier::both(60.0)));
    emitter.add_modifier(Box::new(DirectionModifier::new(Vec3::new(0.0, -1.0, 0.0))));
    emitter.add_modifier(Box::new(AlphaModifier::new(0.8)));
    emitter.add_modifier(Box::new(LifetimeModifier::random_multiply()));
    emitter.start();

    // --------------------------
    // Boucle principale
    // --------------------------
    let [r, g, b, a] = renderer_config.clear_color;
    let started = Instant::now();
    let mut last = started;
    let mut frames: u64 = 0;

    while !window.should_close() {
        glfw.poll_events();
        for (_, event) in glfw::flush_messages(&events) {
            match event {
                WindowEvent::Key(Key::Escape, _, Action::Press, _) => window.set_should_close(true),
                WindowEvent::Key(Key::Space, _, Action::Press, _) => {
                    if emitter.is_running() {
                        emitter.stop();
                    } else {
                        emitter.start();
                    }
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let time = GameTime::new(now - last, now - started);
        last = now;

        emitter.update(&time);

        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
        emitter.draw(&mut batch)?;

        window.swap_buffers();
        frames += 1;
    }

    let stats = batch.stats();
    info!(
        "🏁 {} frames, {} particles spawned, last frame: {} draw calls for {} quads",
        frames,
        emitter.spawned_total(),
        stats.draw_calls,
        stats.quads
    );

    let mut backend = batch.close();
    backend.close();

    Ok(())
}
