use std::process::ExitCode;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3, Vec4};

use learn_gl::assets::geometry::{CUBE_POSITIONS, TEXTURED_CUBE_VERTICES};
use learn_gl::input::close_requested;
use learn_gl::render::core::{enable_alpha_blending, enable_depth_test, set_wireframe};
use learn_gl::{
    asset_path, run_lesson, LessonConfig, Mesh, ShaderProgram, Texture, TextureParameters,
    VertexLayout, Window, WindowOptions, WindowState,
};

fn main() -> ExitCode {
    let defaults = LessonConfig::new(WindowOptions::titled("Coordinate Systems").with_version(3, 3));
    run_lesson("coordinate_systems", defaults, run)
}

/// Model matrix for the `index`th cube: even cubes tumble about the diagonal,
/// odd ones spin about -Y, every third one gets an extra roll, and each starts
/// from its own fixed tilt.
fn cube_model(index: usize, position: Vec3, time: f32) -> Mat4 {
    let mut model = Mat4::from_translation(position);

    if index % 2 == 0 {
        model *= Mat4::from_axis_angle(Vec3::ONE.normalize(), time);
    } else {
        model *= Mat4::from_axis_angle(Vec3::NEG_Y, time);
    }
    if index % 3 == 0 {
        model *= Mat4::from_axis_angle(Vec3::new(-1.0, 1.0, -1.0).normalize(), time);
    }

    let tilt = (20.0 * index as f32).to_radians();
    model * Mat4::from_axis_angle(Vec3::new(1.0, 0.3, 0.5).normalize(), tilt)
}

fn run(config: LessonConfig) -> Result<()> {
    let mut window = Window::new(config.window)?;
    window.set_clear_colour(Vec4::new(0.2, 0.2, 0.2, 1.0));
    enable_depth_test();
    enable_alpha_blending();

    let mut shader = ShaderProgram::from_files(
        asset_path("shaders/coordinate_systems/shader.vert"),
        asset_path("shaders/coordinate_systems/shader.frag"),
    )
    .context("loading cube shaders")?;
    let wall = Texture::from_file(asset_path("textures/wall.png"), TextureParameters::default())
        .context("loading wall texture")?;

    // position, texture coordinates
    let cube = Mesh::new(&TEXTURED_CUBE_VERTICES, &VertexLayout::new().attribute(3).attribute(2));

    shader.set_uniform("tex", 0i32);

    // The camera never moves in this lesson: the world is pushed 3 units away.
    let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0));
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

        // Rebuilt every frame so resizing keeps the aspect ratio correct.
        let projection = Mat4::perspective_rh_gl(45f32.to_radians(), window.aspect_ratio(), 0.1, 100.0);

        wall.bind(0);
        shader.set_uniform("shaderState", state.shader_state);
        shader.set_uniform("projection", projection);
        shader.set_uniform("view", view);

        let time = window.time() as f32;
        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            shader.set_uniform("model", cube_model(i, *position, time));
            cube.draw();
        }

        window.swap_buffers()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_model_keeps_position() {
        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            let centre = cube_model(i, *position, 1.25) * Vec4::new(0.0, 0.0, 0.0, 1.0);
            assert_relative_eq!(centre.truncate(), *position, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_cube_model_is_rigid() {
        let model = cube_model(3, Vec3::ZERO, 0.7);
        assert_relative_eq!(model.determinant(), 1.0, epsilon = 1e-5);
    }
}
