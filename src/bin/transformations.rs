use std::process::ExitCode;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3, Vec4};

use learn_gl::assets::geometry::{TEXTURED_QUAD_INDICES, TEXTURED_QUAD_VERTICES};
use learn_gl::input::close_requested;
use learn_gl::render::core::{enable_alpha_blending, set_wireframe};
use learn_gl::{
    asset_path, run_lesson, LessonConfig, Mesh, ShaderProgram, Texture, TextureParameters,
    VertexLayout, Window, WindowOptions, WindowState,
};

fn main() -> ExitCode {
    let defaults = LessonConfig::new(WindowOptions::titled("Transformations").with_version(3, 3));
    run_lesson("transformations", defaults, run)
}

/// Translate, then rotate about -Z, then scale by `sin(time)`. Matrices are
/// multiplied in that order so the scale is applied to the vertices first.
fn transform_at(time: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(-0.5, 0.0, 0.0))
        * Mat4::from_axis_angle(Vec3::NEG_Z, time)
        * Mat4::from_scale(Vec3::splat(time.sin()))
}

fn run(config: LessonConfig) -> Result<()> {
    let mut window = Window::new(config.window)?;
    window.set_clear_colour(Vec4::new(0.0, 0.0, 0.0, 1.0));
    enable_alpha_blending();

    let mut shader = ShaderProgram::from_files(
        asset_path("shaders/transformations/shader.vert"),
        asset_path("shaders/transformations/shader.frag"),
    )
    .context("loading transform shaders")?;

    let base = Texture::from_file(asset_path("textures/container.png"), TextureParameters::default())
        .context("loading container texture")?;
    let overlay = Texture::from_file(asset_path("textures/overlay.png"), TextureParameters::default())
        .context("loading overlay texture")?;

    let layout = VertexLayout::new().attribute(3).attribute(3).attribute(2);
    let quad = Mesh::indexed(&TEXTURED_QUAD_VERTICES, &TEXTURED_QUAD_INDICES, &layout);

    shader.set_uniform("texture1", 0i32);
    shader.set_uniform("texture2", 1i32);

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

        base.bind(0);
        overlay.bind(1);
        shader.set_uniform("transform", transform_at(window.time() as f32));
        shader.set_uniform("shaderState", state.shader_state);
        quad.draw();

        window.swap_buffers()?;
    }

    Ok(())
}
