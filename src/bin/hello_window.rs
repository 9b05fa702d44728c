use std::process::ExitCode;

use anyhow::Result;
use glam::Vec4;
use log::info;

use learn_gl::input::close_requested;
use learn_gl::render::core::max_vertex_attributes;
use learn_gl::{run_lesson, LessonConfig, Window, WindowOptions};

fn main() -> ExitCode {
    let defaults = LessonConfig::new(WindowOptions::titled("Hello Window").with_version(3, 3));
    run_lesson("hello_window", defaults, run)
}

fn run(config: LessonConfig) -> Result<()> {
    let mut window = Window::new(config.window)?;
    info!("Maximum vertex attributes supported: {}", max_vertex_attributes());

    window.set_clear_colour(Vec4::new(0.2, 0.3, 0.3, 1.0));

    while !window.should_close() {
        window.poll_events();
        if close_requested(window.keyboard()) {
            window.set_should_close(true);
        }

        window.clear();
        window.swap_buffers()?;
    }

    Ok(())
}
