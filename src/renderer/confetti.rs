//! Turn papers and ribbons into filled polygons
//!
//! Geometry stays in logical pixels until the last moment; each point is
//! multiplied by the device pixel ratio only as it is handed to the surface.

use glam::Vec2;

use super::batch::DrawSurface;
use crate::palette::Color;
use crate::sim::{ConfettiState, Paper, Ribbon};

#[inline]
fn fill<const N: usize>(surface: &mut impl DrawSurface, points: [Vec2; N], ratio: f32, color: Color) {
    surface.fill_polygon(&points.map(|p| p * ratio), color);
}

/// One spinning quad
pub fn draw_paper(surface: &mut impl DrawSurface, paper: &Paper, ratio: f32) {
    fill(surface, paper.outline(), ratio, paper.face_color());
}

/// Quads along the chain, with pointed caps at the head and tail
pub fn draw_ribbon(surface: &mut impl DrawSurface, ribbon: &Ribbon, ratio: f32) {
    let n = ribbon.particles.len();
    let offset = ribbon.thickness_offset;

    for i in 0..n.saturating_sub(1) {
        let a = ribbon.particles[i].position;
        let b = ribbon.particles[i + 1].position;
        let a_far = a + offset;
        let b_far = b + offset;
        let color = ribbon.segment_color(i);

        if i == 0 {
            let tip = (b + b_far) * 0.5;
            fill(surface, [a, b, tip], ratio, color);
            fill(surface, [b_far, a_far, tip], ratio, color);
        } else if i == n - 2 {
            let tip = (a + a_far) * 0.5;
            fill(surface, [a, b, tip], ratio, color);
            fill(surface, [b_far, a_far, tip], ratio, color);
        } else {
            fill(surface, [a, b, b_far, a_far], ratio, color);
        }
    }
}

/// Papers first, ribbons on top
pub fn draw_state(surface: &mut impl DrawSurface, state: &ConfettiState, ratio: f32) {
    for paper in &state.papers {
        draw_paper(surface, paper, ratio);
    }
    for ribbon in &state.ribbons {
        draw_ribbon(surface, ribbon, ratio);
    }
}
