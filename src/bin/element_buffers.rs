use std::process::ExitCode;

use anyhow::Result;
use glam::Vec4;
use log::debug;

use learn_gl::assets::geometry::{scaled, TRIFORCE_INDICES, TRIFORCE_SCALE, TRIFORCE_VERTICES};
use learn_gl::input::close_requested;
use learn_gl::render::core::set_wireframe;
use learn_gl::{run_lesson, LessonConfig, Mesh, ShaderProgram, VertexLayout, Window, WindowOptions, WindowState};

const VERTEX_SHADER: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos, 1.0);
}
"#;

const GOLD_FRAGMENT_SHADER: &str = r#"
#version 330 core
out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0, 0.843, 0.0, 1.0);
}
"#;

fn main() -> ExitCode {
    let defaults = LessonConfig::new(WindowOptions::titled("OpenGL TriForce").with_version(3, 3));
    run_lesson("element_buffers", defaults, run)
}

fn run(config: LessonConfig) -> Result<()> {
    let mut window = Window::new(config.window)?;
    window.set_clear_colour(Vec4::ZERO);

    let shader = ShaderProgram::from_sources(VERTEX_SHADER, GOLD_FRAGMENT_SHADER)?;

    // Seven corners and nine indices draw three triangles that share edges.
    let vertices = scaled(&TRIFORCE_VERTICES, TRIFORCE_SCALE);
    let triforce = Mesh::indexed(&vertices, &TRIFORCE_INDICES, &VertexLayout::new().attribute(3));
    debug!(
        "Triforce: {} vertices, {} indices",
        triforce.vertex_count(),
        triforce.element_count()
    );

    let mut state = WindowState::new(0.0, 0.0);

    while !window.should_close() {
        for event in window.poll_events() {
            if state.handle_event(&event, None) {
                set_wireframe(state.wireframe);
            }
        }
        if close_requested(window.keyboard()) {
            window.set_should_close(true);
        }

        window.clear();
        shader.use_program();
        triforce.draw();
        window.swap_buffers()?;
    }

    Ok(())
}
