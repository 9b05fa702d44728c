use std::process::ExitCode;

use anyhow::Result;
use glam::Vec4;

use learn_gl::assets::geometry::TWO_TRIANGLES;
use learn_gl::input::close_requested;
use learn_gl::{run_lesson, LessonConfig, Mesh, ShaderProgram, VertexLayout, Window, WindowOptions};

const VERTEX_SHADER: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos, 1.0);
}
"#;

const ORANGE_FRAGMENT_SHADER: &str = r#"
#version 330 core
out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
"#;

const RED_FRAGMENT_SHADER: &str = r#"
#version 330 core
out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0, 0.0, 0.0, 1.0);
}
"#;

fn main() -> ExitCode {
    let defaults = LessonConfig::new(WindowOptions::titled("OpenGL Triangle").with_version(3, 3));
    run_lesson("multiple_fragment_shaders", defaults, run)
}

fn run(config: LessonConfig) -> Result<()> {
    let mut window = Window::new(config.window)?;
    window.set_clear_colour(Vec4::ZERO);

    // Both programs share the vertex stage source but compile it separately.
    let orange = ShaderProgram::from_sources(VERTEX_SHADER, ORANGE_FRAGMENT_SHADER)?;
    let red = ShaderProgram::from_sources(VERTEX_SHADER, RED_FRAGMENT_SHADER)?;

    let layout = VertexLayout::new().attribute(3);
    let left = Mesh::new(&TWO_TRIANGLES[0], &layout);
    let right = Mesh::new(&TWO_TRIANGLES[1], &layout);

    while !window.should_close() {
        window.poll_events();
        if close_requested(window.keyboard()) {
            window.set_should_close(true);
        }

        window.clear();

        orange.use_program();
        left.draw();

        red.use_program();
        right.draw();

        window.swap_buffers()?;
    }

    Ok(())
}
