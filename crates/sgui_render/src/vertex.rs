//! Vertex format and projection for GPU submission.

use sgui_ui::Color;

/// Vertex for UI rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UIVertex {
    /// Position in window pixels (x, y).
    pub position: [f32; 2],
    /// Normalized texture coordinates.
    pub uv: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl UIVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }

    /// Untextured vertex.
    #[must_use]
    pub const fn solid(x: f32, y: f32, color: Color) -> Self {
        Self::new(x, y, 0.0, 0.0, color.to_array())
    }
}

/// Column-major orthographic projection mapping window pixels (origin top
/// left, y down) to clip space.
#[must_use]
pub fn ortho(width: f32, height: f32) -> [[f32; 4]; 4] {
    let sx = if width > 0.0 { 2.0 / width } else { 0.0 };
    let sy = if height > 0.0 { -2.0 / height } else { 0.0 };
    [
        [sx, 0.0, 0.0, 0.0],
        [0.0, sy, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [-1.0, 1.0, 0.0, 1.0],
    ]
}

/// Applies a column-major matrix to a 2D point.
#[must_use]
pub fn project(matrix: &[[f32; 4]; 4], x: f32, y: f32) -> [f32; 2] {
    [
        matrix[0][0] * x + matrix[1][0] * y + matrix[3][0],
        matrix[0][1] * x + matrix[1][1] * y + matrix[3][1],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<UIVertex>(), 32);
        let vertex = UIVertex::solid(1.0, 2.0, Color::WHITE);
        let bytes: &[u8] = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn test_ortho_corners() {
        let m = ortho(800.0, 600.0);
        assert_eq!(project(&m, 0.0, 0.0), [-1.0, 1.0]);
        assert_eq!(project(&m, 800.0, 600.0), [1.0, -1.0]);
        assert_eq!(project(&m, 400.0, 300.0), [0.0, 0.0]);
    }
}
