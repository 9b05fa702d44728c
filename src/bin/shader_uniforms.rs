use std::process::ExitCode;

use anyhow::{Context, Result};
use glam::{Vec3, Vec4};

use learn_gl::assets::geometry::{COLOURED_QUAD_INDICES, COLOURED_QUAD_VERTICES};
use learn_gl::input::close_requested;
use learn_gl::render::core::set_wireframe;
use learn_gl::{
    asset_path, run_lesson, LessonConfig, Mesh, ShaderProgram, VertexLayout, Window, WindowOptions,
    WindowState,
};

fn main() -> ExitCode {
    let defaults = LessonConfig::new(WindowOptions::titled("Shader Uniforms").with_version(3, 3));
    run_lesson("shader_uniforms", defaults, run)
}

/// Oscillates between black and white over roughly six seconds, phase-shifted
/// per channel.
fn tint_at(time: f32) -> Vec3 {
    Vec3::new(
        time.sin() * 0.5 + 0.5,
        (time + 2.0).sin() * 0.5 + 0.5,
        (time + 4.0).sin() * 0.5 + 0.5,
    )
}

fn run(config: LessonConfig) -> Result<()> {
    let mut window = Window::new(config.window)?;
    window.set_clear_colour(Vec4::new(0.0, 0.0, 0.0, 1.0));

    let mut shader = ShaderProgram::from_files(
        asset_path("shaders/shader_uniforms/shader.vert"),
        asset_path("shaders/shader_uniforms/shader.frag"),
    )
    .context("loading tint shaders")?;

    // position, colour
    let layout = VertexLayout::new().attribute(3).attribute(3);
    let quad = Mesh::indexed(&COLOURED_QUAD_VERTICES, &COLOURED_QUAD_INDICES, &layout);

    let mut state = WindowState::new(0.0, 0.0);

    while !window.should_close() {
        window.update_time();
        for event in window.poll_events() {
            if state.handle_event(&event, None) {
                set_wireframe(state.wireframe);
            }
        }
        if close_requested(window.keyboard()) {
            window.set_should_close(true);
        }

        window.clear();

        shader.set_uniform("tint", tint_at(window.time() as f32));
        quad.draw();

        window.swap_buffers()?;
    }

    Ok(())
}
