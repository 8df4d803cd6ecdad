//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle (two triangles)
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Rectangle outline of the given stroke width, centred on the edges
pub fn rect_outline(min: Vec2, size: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let h = width / 2.0;
    let max = min + size;
    let mut vertices = Vec::with_capacity(24);
    // Top, bottom (full width), then left and right between them
    vertices.extend(rect(Vec2::new(min.x - h, min.y - h), Vec2::new(size.x + width, width), color));
    vertices.extend(rect(Vec2::new(min.x - h, max.y - h), Vec2::new(size.x + width, width), color));
    vertices.extend(rect(Vec2::new(min.x - h, min.y + h), Vec2::new(width, size.y - width), color));
    vertices.extend(rect(Vec2::new(max.x - h, min.y + h), Vec2::new(width, size.y - width), color));
    vertices
}

/// Straight line segment as a thin quad
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let (a, b, c, d) = (from + perp, from - perp, to + perp, to - perp);
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let (s1, c1) = theta1.sin_cos();
        let (s2, c2) = theta2.sin_cos();
        let inner1 = center + Vec2::new(c1, s1) * inner_radius;
        let outer1 = center + Vec2::new(c1, s1) * outer_radius;
        let inner2 = center + Vec2::new(c2, s2) * inner_radius;
        let outer2 = center + Vec2::new(c2, s2) * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Bone shape: a bar with a pair of knobs at each end
pub fn bone(center: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let knob = size * 0.18;
    let half_len = size / 2.0 - knob;
    let mut vertices = rect(
        center - Vec2::new(half_len, knob * 0.8),
        Vec2::new(half_len * 2.0, knob * 1.6),
        color,
    );
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            let c = center + Vec2::new(sx * half_len, sy * knob * 0.9);
            vertices.extend(circle(c, knob, color, 10));
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for v in vertices {
            let p = Vec2::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    #[test]
    fn test_rect_covers_area() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        assert_eq!(bounds(&v), (Vec2::new(10.0, 20.0), Vec2::new(40.0, 60.0)));
    }

    #[test]
    fn test_outline_straddles_edges() {
        let v = rect_outline(Vec2::ZERO, Vec2::new(100.0, 50.0), 2.0, [1.0; 4]);
        assert_eq!(v.len(), 24);
        assert_eq!(bounds(&v), (Vec2::new(-1.0, -1.0), Vec2::new(101.0, 51.0)));
    }

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 5.0, [1.0; 4], 16).len(), 48);
        assert_eq!(ring(Vec2::ZERO, 4.0, 5.0, [1.0; 4], 16).len(), 96);
    }

    #[test]
    fn test_bone_fits_its_size() {
        let (min, max) = bounds(&bone(Vec2::new(50.0, 50.0), 20.0, [1.0; 4]));
        assert!(min.x >= 40.0 - 1e-3 && max.x <= 60.0 + 1e-3);
    }
}
