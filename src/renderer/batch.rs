//! Drawing target abstraction and the CPU triangle batch

use glam::Vec2;

use super::vertex::Vertex;
use crate::palette::Color;

/// A 2-D target that can be cleared and filled with convex polygons.
/// Coordinates are device pixels, origin top-left, y down.
pub trait DrawSurface {
    fn clear(&mut self);

    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
}

/// Triangle list in device pixels, rebuilt every frame
#[derive(Debug, Clone, Default)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
    polygons: usize,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Polygons filled since the last clear
    pub fn polygon_count(&self) -> usize {
        self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl DrawSurface for VertexBatch {
    fn clear(&mut self) {
        self.vertices.clear();
        self.polygons = 0;
    }

    /// Fan triangulation; fine for the convex quads and triangles confetti uses
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let p0 = points[0];
        for pair in points[1..].windows(2) {
            self.vertices.push(Vertex::colored(p0.x, p0.y, color));
            self.vertices.push(Vertex::colored(pair[0].x, pair[0].y, color));
            self.vertices.push(Vertex::colored(pair[1].x, pair[1].y, color));
        }
        self.polygons += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    #[test]
    fn test_quad_is_two_triangles() {
        let mut batch = VertexBatch::new();
        let quad = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        batch.fill_polygon(&quad, RED);
        assert_eq!(batch.vertices().len(), 6);
        assert_eq!(batch.polygon_count(), 1);
        assert_eq!(batch.vertices()[3].position, [0.0, 0.0]);
        assert_eq!(batch.vertices()[5].position, [0.0, 10.0]);
        assert!(batch.vertices().iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_degenerate_polygon_skipped() {
        let mut batch = VertexBatch::new();
        batch.fill_polygon(&[Vec2::ZERO, Vec2::X], RED);
        assert!(batch.is_empty());
        assert_eq!(batch.polygon_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut batch = VertexBatch::new();
        batch.fill_polygon(&[Vec2::ZERO, Vec2::X, Vec2::Y], RED);
        batch.clear();
        assert!(batch.is_empty());
        assert_eq!(batch.polygon_count(), 0);
    }
}
