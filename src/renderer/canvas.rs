//! Canvas 2D renderer

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{
    Frame, PARTICLE_SIZE, RenderError, Renderer, css_color, css_color_alpha, palette, star_field,
};
use crate::sim::Entity;

/// Draws frames onto an HTML canvas with the 2D context
pub struct Canvas2dRenderer {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, RenderError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| RenderError::Backend(format!("{:?}", e)))?
            .ok_or(RenderError::SurfaceUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::SurfaceUnavailable)?;
        Ok(Self { ctx })
    }

    fn fill_entity(&self, e: &Entity, inset: f32) {
        self.ctx.fill_rect(
            (e.pos.x + inset) as f64,
            (e.pos.y + inset) as f64,
            (e.size.x - inset * 2.0) as f64,
            (e.size.y - inset * 2.0) as f64,
        );
    }

    fn draw_background(&self, frame: &Frame<'_>) -> Result<(), RenderError> {
        let (w, h) = (frame.width as f64, frame.height as f64);
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        gradient
            .add_color_stop(0.0, &css_color(palette::BACKGROUND_TOP))
            .map_err(|e| RenderError::Backend(format!("{:?}", e)))?;
        gradient
            .add_color_stop(1.0, &css_color(palette::BACKGROUND_BOTTOM))
            .map_err(|e| RenderError::Backend(format!("{:?}", e)))?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.ctx.set_fill_style_str(&css_color(palette::STAR));
        for star in star_field(frame.width, frame.height) {
            self.ctx.fill_rect(star.x as f64, star.y as f64, 1.0, 1.0);
        }
        Ok(())
    }
}

impl Renderer for Canvas2dRenderer {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        self.draw_background(frame)?;

        // Player with inner glow
        let player = css_color(palette::PLAYER);
        self.ctx.set_fill_style_str(&player);
        self.fill_entity(frame.player, 0.0);
        self.ctx.set_shadow_blur(10.0);
        self.ctx.set_shadow_color(&player);
        self.fill_entity(frame.player, 5.0);
        self.ctx.set_shadow_blur(0.0);

        self.ctx.set_fill_style_str(&css_color(palette::BULLET));
        for bullet in frame.bullets {
            self.fill_entity(bullet, 0.0);
        }

        let enemy = css_color(palette::ENEMY);
        self.ctx.set_fill_style_str(&enemy);
        self.ctx.set_shadow_color(&enemy);
        for e in frame.enemies {
            self.ctx.set_shadow_blur(0.0);
            self.fill_entity(e, 0.0);
            self.ctx.set_shadow_blur(5.0);
            self.fill_entity(e, 2.0);
        }
        self.ctx.set_shadow_blur(0.0);

        for p in frame.particles {
            self.ctx
                .set_fill_style_str(&css_color_alpha(p.color, p.alpha()));
            self.ctx.fill_rect(
                p.pos.x as f64,
                p.pos.y as f64,
                PARTICLE_SIZE as f64,
                PARTICLE_SIZE as f64,
            );
        }
        Ok(())
    }
}
