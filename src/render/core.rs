//! Global pipeline state shared by the lesson programs.

use gl::types::*;

pub fn enable_depth_test() {
    unsafe {
        gl::Enable(gl::DEPTH_TEST);
    }
}

/// Standard "over" blending so images with an alpha channel are see-through.
pub fn enable_alpha_blending() {
    unsafe {
        gl::Enable(gl::BLEND);
        gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
    }
}

pub fn set_wireframe(enabled: bool) {
    let mode = if enabled { gl::LINE } else { gl::FILL };
    unsafe {
        gl::PolygonMode(gl::FRONT_AND_BACK, mode);
    }
}

pub fn set_viewport(width: u32, height: u32) {
    unsafe {
        gl::Viewport(0, 0, width as GLsizei, height as GLsizei);
    }
}

/// The switches the lessons toggle, captured so another renderer sharing
/// the context can put them back afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineState {
    pub depth_test: bool,
    pub blending: bool,
    pub wireframe: bool,
}

impl PipelineState {
    pub fn capture() -> Self {
        // Core profiles report one value here, compatibility profiles two.
        let mut polygon_mode: [GLint; 2] = [gl::FILL as GLint; 2];
        unsafe {
            gl::GetIntegerv(gl::POLYGON_MODE, polygon_mode.as_mut_ptr());
            Self {
                depth_test: gl::IsEnabled(gl::DEPTH_TEST) == gl::TRUE,
                blending: gl::IsEnabled(gl::BLEND) == gl::TRUE,
                wireframe: polygon_mode[0] == gl::LINE as GLint,
            }
        }
    }

    pub fn restore(self) {
        unsafe {
            if self.depth_test {
                gl::Enable(gl::DEPTH_TEST);
            } else {
                gl::Disable(gl::DEPTH_TEST);
            }
            if !self.blending {
                gl::Disable(gl::BLEND);
            }
        }
        if self.blending {
            enable_alpha_blending();
        }
        set_wireframe(self.wireframe);
    }
}

/// How many vertex attributes the driver lets a vertex shader read (at least 16).
pub fn max_vertex_attributes() -> GLint {
    let mut count = 0;
    unsafe {
        gl::GetIntegerv(gl::MAX_VERTEX_ATTRIBS, &mut count);
    }
    count
}

/// Drains the GL error queue, logging each entry. Returns the number of
/// errors that were pending.
pub fn check_gl_error(context: &str) -> usize {
    let mut count = 0;
    loop {
        let error = unsafe { gl::GetError() };
        if error == gl::NO_ERROR {
            break;
        }
        log::error!("GL error in {}: {} (0x{:04X})", context, error_name(error), error);
        count += 1;
    }
    count
}

pub fn error_name(error: GLenum) -> &'static str {
    match error {
        gl::INVALID_ENUM => "INVALID_ENUM",
        gl::INVALID_VALUE => "INVALID_VALUE",
        gl::INVALID_OPERATION => "INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "STACK_OVERFLOW",
        _ => "UNKNOWN_ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names() {
        assert_eq!(error_name(gl::INVALID_OPERATION), "INVALID_OPERATION");
        assert_eq!(error_name(gl::OUT_OF_MEMORY), "OUT_OF_MEMORY");
        assert_eq!(error_name(0xDEAD), "UNKNOWN_ERROR");
    }
}
