use std::process::ExitCode;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3, Vec4};
use log::debug;

use learn_gl::assets::geometry::{CUBE_POSITIONS, TEXTURED_CUBE_VERTICES};
use learn_gl::input::process_input;
use learn_gl::render::core::{enable_alpha_blending, enable_depth_test, set_wireframe};
use learn_gl::{
    asset_path, run_lesson, Camera, CameraOptions, FpsCounter, LessonConfig, Mesh, ShaderProgram,
    Texture, TextureParameters, VertexLayout, Window, WindowOptions, WindowState,
};

fn main() -> ExitCode {
    let window = WindowOptions::titled("Cameras And Viewing")
        .with_vsync(true)
        .with_overlay(true);
    let camera = CameraOptions::at(Vec3::new(0.0, 0.0, 0.25))
        .with_speed(7.5)
        .with_sensitivity(0.08);
    let defaults = LessonConfig::new(window).with_camera(camera);
    run_lesson("camera", defaults, run)
}

/// Each cube spins about a different combination of axes depending on its index.
fn cube_model(index: usize, position: Vec3, time: f32) -> Mat4 {
    let mut model = Mat4::from_translation(position);

    if index % 2 == 0 {
        model *= Mat4::from_axis_angle(Vec3::ONE.normalize(), time);
    } else {
        model *= Mat4::from_axis_angle(Vec3::NEG_ONE.normalize(), time);
    }
    if index % 3 == 0 {
        model *= Mat4::from_axis_angle(Vec3::new(1.0, -1.0, -1.0).normalize(), time);
    }
    if index % 4 == 0 {
        model *= Mat4::from_axis_angle(Vec3::new(-1.0, 1.0, 1.0).normalize(), time);
    }
    model
}

fn run(config: LessonConfig) -> Result<()> {
    let title = config.window.title.clone();
    let mut window = Window::new(config.window)?;
    window.capture_cursor();
    window.set_clear_colour(Vec4::new(0.1, 0.1, 0.1, 1.0));
    enable_depth_test();
    enable_alpha_blending();

    let mut shader = ShaderProgram::from_files(
        asset_path("shaders/camera/shader.vert"),
        asset_path("shaders/camera/shader.frag"),
    )
    .context("loading camera shaders")?;
    let wall = Texture::from_file(asset_path("textures/wall.png"), TextureParameters::default())
        .context("loading wall texture")?;
    let cube = Mesh::new(&TEXTURED_CUBE_VERTICES, &VertexLayout::new().attribute(3).attribute(2));

    shader.set_uniform("tex", 0i32);

    let mut camera = Camera::new(config.camera);
    let mut state = WindowState::new(
        window.framebuffer_width() as f32 / 2.0,
        window.framebuffer_height() as f32 / 2.0,
    );
    let mut fps = FpsCounter::new();
    let mut readout = String::from("FPS: --");

    while !window.should_close() {
        window.update_time();
        let delta_time = window.delta_time();

        if fps.update(delta_time) {
            if let Some(summary) = fps.summary() {
                debug!("{}", summary);
                if !window.has_overlay() {
                    window.set_title(&format!("{} | {}", title, summary));
                }
                readout = summary;
            }
        }

        for event in window.poll_events() {
            if state.handle_event(&event, Some(&mut camera)) {
                set_wireframe(state.wireframe);
            }
        }
        if process_input(window.keyboard(), &mut camera, delta_time) {
            window.set_should_close(true);
        }

        window.clear();

        wall.bind(0);
        shader.set_uniform("shaderState", state.shader_state);
        shader.set_uniform("view", camera.view_matrix());
        shader.set_uniform(
            "projection",
            camera.default_projection(window.framebuffer_width(), window.framebuffer_height()),
        );

        let time = window.time() as f32;
        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            shader.set_uniform("model", cube_model(i, *position, time));
            cube.draw();
        }

        window.draw_overlay(&readout);
        window.swap_buffers()?;
    }

    Ok(())
}
