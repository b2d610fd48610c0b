//! Morphbot Render - wgpu renderer for scene draw lists
//!
//! The scene records world-space triangles and line segments into a
//! [`morphbot_scene::DrawList`]; [`FrameRenderer`] uploads that list each frame
//! and draws it with a single view-projection uniform from [`ViewCamera`].

mod camera;
mod context;
mod frame_renderer;
mod pipeline;
mod primitives;

pub use camera::ViewCamera;
pub use context::{RenderContext, RenderError};
pub use frame_renderer::FrameRenderer;
pub use pipeline::{FramePipeline, ViewUniforms};
pub use primitives::Vertex;

#[cfg(test)]
mod tests {
    #[test]
    fn shader_wgsl_parses() {
        let source = include_str!("shader.wgsl");
        naga::front::wgsl::parse_str(source).expect("shader.wgsl failed to parse");
    }
}
