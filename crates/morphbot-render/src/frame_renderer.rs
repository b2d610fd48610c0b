//! Uploads a recorded draw list and draws it

use crate::camera::ViewCamera;
use crate::context::{RenderContext, RenderError};
use crate::pipeline::{FramePipeline, ViewUniforms};
use crate::primitives::to_gpu_vertices;
use morphbot_core::Color;
use morphbot_scene::DrawList;
use wgpu::util::DeviceExt;

/// Draws one [`DrawList`] per frame: faces first, outlines on top
pub struct FrameRenderer {
    pipeline: FramePipeline,
    view_buffer: wgpu::Buffer,
    view_bind_group: wgpu::BindGroup,
    clear_color: wgpu::Color,
}

impl FrameRenderer {
    pub fn new(context: &RenderContext, clear_color: Color) -> Self {
        let device = &context.device;
        let pipeline = FramePipeline::new(device, context.config.format);

        let view_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("View Uniform Buffer"),
            contents: bytemuck::cast_slice(&[ViewUniforms::new(morphbot_core::math::IDENTITY)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let view_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pipeline.view_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_buffer.as_entire_binding(),
            }],
            label: Some("View Bind Group"),
        });

        Self {
            pipeline,
            view_buffer,
            view_bind_group,
            clear_color: wgpu::Color {
                r: clear_color.r as f64,
                g: clear_color.g as f64,
                b: clear_color.b as f64,
                a: clear_color.a as f64,
            },
        }
    }

    /// Render a frame. Lost or outdated surfaces are reconfigured and the frame skipped.
    pub fn render(
        &mut self,
        context: &mut RenderContext,
        camera: &ViewCamera,
        list: &DrawList,
    ) -> Result<(), RenderError> {
        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost or outdated, reconfiguring");
                context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("timed out acquiring surface texture, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(RenderError::SurfaceError(e.to_string())),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniforms = ViewUniforms::new(camera.view_projection_matrix(context.aspect_ratio()));
        context
            .queue
            .write_buffer(&self.view_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let device = &context.device;
        let fill_buffer = vertex_buffer(device, "Fill Vertex Buffer", list.triangles());
        let line_buffer = vertex_buffer(device, "Outline Vertex Buffer", list.lines());

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.view_bind_group, &[]);

            if let Some((buffer, count)) = &fill_buffer {
                render_pass.set_pipeline(&self.pipeline.fill_pipeline);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..*count, 0..1);
            }
            if let Some((buffer, count)) = &line_buffer {
                render_pass.set_pipeline(&self.pipeline.line_pipeline);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..*count, 0..1);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Upload a vertex stream. Empty streams produce no buffer.
fn vertex_buffer(
    device: &wgpu::Device,
    label: &str,
    vertices: &[morphbot_scene::DrawVertex],
) -> Option<(wgpu::Buffer, u32)> {
    if vertices.is_empty() {
        return None;
    }
    let gpu = to_gpu_vertices(vertices);
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&gpu),
        usage: wgpu::BufferUsages::VERTEX,
    });
    Some((buffer, gpu.len() as u32))
}
