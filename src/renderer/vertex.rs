//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.102, 0.102, 0.180, 1.0]; // #1a1a2e
    pub const GRID: [f32; 4] = [0.165, 0.165, 0.306, 1.0]; // #2a2a4e
    pub const BOUNDARY: [f32; 4] = [0.976, 0.451, 0.086, 1.0]; // #f97316
    pub const PLAYER: [f32; 4] = [0.851, 0.600, 0.290, 1.0];
    pub const PLAYER_SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
    pub const FUD: [f32; 4] = [0.545, 0.333, 0.200, 1.0]; // Bear brown
    pub const WHALE: [f32; 4] = [0.580, 0.380, 0.820, 1.0];
    pub const HYPE: [f32; 4] = [0.950, 0.930, 0.860, 1.0]; // Bone
    pub const BONUS: [f32; 4] = [0.984, 0.749, 0.141, 1.0]; // #fbbf24
    pub const LIFE: [f32; 4] = [0.973, 0.318, 0.286, 1.0]; // #f85149
    pub const LIFE_LOST: [f32; 4] = [0.3, 0.3, 0.35, 0.6];
    pub const BAR_TRACK: [f32; 4] = [0.216, 0.255, 0.318, 1.0]; // #374151
    pub const BAR_FILL: [f32; 4] = BOUNDARY;
    pub const BAR_BEATEN: [f32; 4] = [0.133, 0.773, 0.369, 1.0]; // #22c55e
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.8];
    pub const PAUSE_OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.5];

    /// High contrast variant (white on black)
    pub fn high_contrast(color: [f32; 4]) -> [f32; 4] {
        let luma = 0.299 * color[0] + 0.587 * color[1] + 0.114 * color[2];
        let v = if luma > 0.35 { 1.0 } else { 0.0 };
        [v, v, v, color[3]]
    }
}
