use std::process::ExitCode;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3, Vec4};
use log::debug;

use learn_gl::assets::geometry::NORMAL_CUBE_VERTICES;
use learn_gl::input::process_input;
use learn_gl::render::core::{enable_alpha_blending, enable_depth_test, set_wireframe};
use learn_gl::{
    asset_path, run_lesson, Camera, CameraOptions, FpsCounter, LessonConfig, Mesh, ShaderProgram,
    VertexLayout, Window, WindowOptions, WindowState,
};

const LIGHT_POSITION: Vec3 = Vec3::new(1.2, 1.0, 2.0);
const LIGHT_COLOUR: Vec3 = Vec3::ONE;
const OBJECT_COLOUR: Vec3 = Vec3::new(1.0, 0.5, 0.31);
const LAMP_SCALE: f32 = 0.125;

fn main() -> ExitCode {
    let window = WindowOptions::titled("Diffuse Lighting")
        .with_vsync(false)
        .with_overlay(true);
    let camera = CameraOptions::at(Vec3::new(0.0, 0.0, 6.0))
        .with_speed(7.5)
        .with_sensitivity(0.1);
    let defaults = LessonConfig::new(window).with_camera(camera);
    run_lesson("lighting", defaults, run)
}

fn run(config: LessonConfig) -> Result<()> {
    let title = config.window.title.clone();
    let mut window = Window::new(config.window)?;
    window.capture_cursor();
    window.set_clear_colour(Vec4::new(0.0, 0.0, 0.0, 1.0));
    enable_depth_test();
    enable_alpha_blending();

    let mut cube_shader = ShaderProgram::from_files(
        asset_path("shaders/lighting/cube.vert"),
        asset_path("shaders/lighting/cube.frag"),
    )
    .context("loading cube shaders")?;
    let mut lamp_shader = ShaderProgram::from_files(
        asset_path("shaders/lighting/lamp.vert"),
        asset_path("shaders/lighting/lamp.frag"),
    )
    .context("loading lamp shaders")?;

    // The lamp reads only positions from the same data, skipping the normals.
    let cube = Mesh::new(&NORMAL_CUBE_VERTICES, &VertexLayout::new().attribute(3).attribute(3));
    let lamp = Mesh::new(&NORMAL_CUBE_VERTICES, &VertexLayout::new().attribute(3).skip(3));

    let lamp_model = Mat4::from_translation(LIGHT_POSITION) * Mat4::from_scale(Vec3::splat(LAMP_SCALE));

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

        let view = camera.view_matrix();
        let projection = camera.default_projection(window.framebuffer_width(), window.framebuffer_height());
        let model = Mat4::from_axis_angle(Vec3::Y, window.time() as f32);

        cube_shader.set_uniform("view", view);
        cube_shader.set_uniform("projection", projection);
        cube_shader.set_uniform("model", model);
        cube_shader.set_uniform("objectColour", OBJECT_COLOUR);
        cube_shader.set_uniform("lightColour", LIGHT_COLOUR);
        cube_shader.set_uniform("lightPos", LIGHT_POSITION);
        cube.draw();

        lamp_shader.set_uniform("view", view);
        lamp_shader.set_uniform("projection", projection);
        lamp_shader.set_uniform("model", lamp_model);
        lamp.draw();

        window.draw_overlay(&readout);
        window.swap_buffers()?;
    }

    Ok(())
}
