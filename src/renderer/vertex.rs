//! Vertex layout shared by the tessellator and the pipeline

use bytemuck::{Pod, Zeroable};

use super::pipeline::canvas_to_ndc;

/// Coloured vertex; tessellated in canvas pixels, uploaded in NDC
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Same vertex with its canvas position mapped to clip space
    pub fn to_ndc(self) -> Self {
        let (x, y) = canvas_to_ndc(self.position[0], self.position[1]);
        Self::new(x, y, self.color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Canvas clear colour
pub const BACKGROUND: wgpu::Color = wgpu::Color::BLACK;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_ndc_keeps_color() {
        let color = [0.1, 0.2, 0.3, 1.0];
        let v = Vertex::new(800.0, 0.0, color).to_ndc();
        assert_eq!(v.position, [1.0, 1.0]);
        assert_eq!(v.color, color);
    }

    #[test]
    fn test_layout_stride() {
        assert_eq!(Vertex::desc().array_stride, 24);
        assert_eq!(Vertex::ATTRIBUTES[1].offset, 8);
    }
}
