//! Immediate-mode text drawn over a lesson's scene, used for the FPS readout.

use std::ffi::CString;
use std::sync::Arc;

use egui_glow::Painter;
use glutin::display::Display;
use glutin::prelude::*;
use log::debug;
use thiserror::Error;

use crate::render::core::{set_wireframe, PipelineState};

/// Distance in points between the window's top-left corner and the text.
const MARGIN: f32 = 10.0;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Failed to create overlay painter: {0}")]
    Painter(String),
}

/// A single undecorated label in the top-left corner. It never receives
/// window events, so it cannot steal keys or the cursor from a lesson.
pub struct TextOverlay {
    painter: Painter,
    state: egui_winit::State,
    ctx: egui::Context,
}

impl TextOverlay {
    /// Needs the GL context behind `display` to be current.
    pub fn new(window: &winit::window::Window, display: &Display) -> Result<Self, OverlayError> {
        let gl = Arc::new(unsafe {
            glow::Context::from_loader_function(|symbol| match CString::new(symbol) {
                Ok(symbol) => display.get_proc_address(symbol.as_c_str()),
                Err(_) => std::ptr::null(),
            })
        });
        let painter = Painter::new(gl, "", None).map_err(|e| OverlayError::Painter(e.to_string()))?;

        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::from_hash_of(window.id()),
            window,
            Some(window.scale_factor() as f32),
            Some(painter.max_texture_side()),
        );
        debug!("Created text overlay");

        Ok(Self { painter, state, ctx })
    }

    /// Paints `text` on top of whatever has been drawn this frame. Call just
    /// before swapping buffers.
    pub fn draw(&mut self, window: &winit::window::Window, text: &str) {
        let raw_input = self.state.take_egui_input(window);
        // Platform output is dropped: applying it would reset the cursor a
        // lesson has hidden for mouse-look.
        let output = self.ctx.run(raw_input, |ctx| show_text(ctx, text));
        let primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);

        let size = window.inner_size();
        let saved = PipelineState::capture();
        set_wireframe(false);
        self.painter.paint_and_update_textures(
            [size.width, size.height],
            output.pixels_per_point,
            &primitives,
            &output.textures_delta,
        );
        saved.restore();
    }
}

impl Drop for TextOverlay {
    fn drop(&mut self) {
        self.painter.destroy();
    }
}

fn show_text(ctx: &egui::Context, text: &str) {
    egui::Area::new(egui::Id::new("text_overlay"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(MARGIN, MARGIN))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(text)
                    .monospace()
                    .color(egui::Color32::WHITE),
            );
        });
}
