//! Canvas 2D renderer
//!
//! Draws a `RenderSnapshot` once per animation frame. Purely a consumer:
//! nothing here touches the simulation. All colors arrive as packed RGB or
//! an HSL hue and are formatted into CSS strings at draw time.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::snapshot::{BulletShape, BulletView, RenderSnapshot};

/// Format packed RGB as a CSS hex color.
fn css_rgb(color: u32) -> String {
    format!("#{:06x}", color & 0xffffff)
}

/// Format an HSL hue as a CSS color at full saturation.
fn css_hsl(hue: f32) -> String {
    format!("hsl({:.0}, 100%, 60%)", hue)
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Draw one frame. Back-to-front: background, particles, pickups,
    /// boss, bullets, player.
    pub fn render(&self, snap: &RenderSnapshot) {
        let ctx = &self.ctx;

        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str("#0a0a14");
        ctx.fill_rect(0.0, 0.0, snap.arena.x as f64, snap.arena.y as f64);

        for p in &snap.particles {
            ctx.set_global_alpha(p.life as f64);
            ctx.set_fill_style_str(&css_rgb(p.color));
            ctx.begin_path();
            let _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, p.size as f64, 0.0, TAU);
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);

        for pickup in &snap.pickups {
            let pulse = 1.0 + 0.15 * pickup.pulse_phase.sin() as f64;
            let r = pickup.radius as f64 * pulse;
            ctx.set_stroke_style_str(&css_rgb(pickup.color));
            ctx.set_line_width(2.0);
            ctx.begin_path();
            let _ = ctx.arc(pickup.pos.x as f64, pickup.pos.y as f64, r, 0.0, TAU);
            ctx.stroke();
            ctx.set_fill_style_str(&css_rgb(pickup.color));
            ctx.begin_path();
            let _ = ctx.arc(pickup.pos.x as f64, pickup.pos.y as f64, r * 0.4, 0.0, TAU);
            ctx.fill();
        }

        if let Some(boss) = &snap.boss {
            let (bx, by) = (boss.pos.x as f64, boss.pos.y as f64);
            ctx.set_stroke_style_str(&css_rgb(crate::consts::COLOR_BOSS));
            ctx.set_line_width(3.0);
            for t in &boss.tentacles {
                let wave = (t.phase + boss.pulse_phase).sin() * 0.4;
                let angle = (t.angle + wave) as f64;
                let reach = (boss.radius + t.length) as f64;
                ctx.begin_path();
                ctx.move_to(bx, by);
                ctx.line_to(bx + angle.cos() * reach, by + angle.sin() * reach);
                ctx.stroke();
            }

            let pulse = 1.0 + 0.08 * boss.pulse_phase.sin() as f64;
            ctx.set_fill_style_str(&css_rgb(crate::consts::COLOR_BOSS));
            ctx.begin_path();
            let _ = ctx.arc(bx, by, boss.radius as f64 * pulse, 0.0, TAU);
            ctx.fill();
        }

        for bullet in &snap.bullets {
            self.draw_bullet(bullet);
        }

        let player = &snap.player;
        ctx.set_fill_style_str(&css_rgb(player.color));
        ctx.begin_path();
        let _ = ctx.arc(
            player.pos.x as f64,
            player.pos.y as f64,
            player.radius as f64,
            0.0,
            TAU,
        );
        ctx.fill();

        if player.shield_active {
            ctx.set_stroke_style_str(&css_rgb(crate::consts::COLOR_SHIELD));
            ctx.set_line_width(2.0);
            ctx.begin_path();
            let _ = ctx.arc(
                player.pos.x as f64,
                player.pos.y as f64,
                (player.radius + 6.0) as f64,
                0.0,
                TAU,
            );
            ctx.stroke();
        }
    }

    fn draw_bullet(&self, bullet: &BulletView) {
        let ctx = &self.ctx;
        let color = css_hsl(bullet.hue);

        // Trail fades from oldest to newest
        let n = bullet.trail.len();
        for (i, point) in bullet.trail.iter().enumerate() {
            let fade = (i + 1) as f64 / (n + 1) as f64;
            ctx.set_global_alpha(fade * 0.4);
            ctx.set_fill_style_str(&color);
            ctx.begin_path();
            let _ = ctx.arc(
                point.x as f64,
                point.y as f64,
                bullet.radius as f64 * fade,
                0.0,
                TAU,
            );
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);

        match &bullet.shape {
            BulletShape::Circle => {
                ctx.set_fill_style_str(&color);
                ctx.begin_path();
                let _ = ctx.arc(
                    bullet.pos.x as f64,
                    bullet.pos.y as f64,
                    bullet.radius as f64,
                    0.0,
                    TAU,
                );
                ctx.fill();
            }
            BulletShape::Polygon { vertices, rotation } => {
                if vertices.is_empty() {
                    return;
                }
                ctx.save();
                let _ = ctx.translate(bullet.pos.x as f64, bullet.pos.y as f64);
                let _ = ctx.rotate(*rotation as f64);
                ctx.set_fill_style_str(&color);
                ctx.begin_path();
                ctx.move_to(vertices[0].x as f64, vertices[0].y as f64);
                for v in &vertices[1..] {
                    ctx.line_to(v.x as f64, v.y as f64);
                }
                ctx.close_path();
                ctx.fill();
                ctx.restore();
            }
        }
    }
}
