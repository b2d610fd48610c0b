//! Viewer application implementing winit ApplicationHandler

use crate::config::ViewerConfig;
use crate::controls::Controls;
use morphbot_render::{FrameRenderer, RenderContext, ViewCamera};
use morphbot_robot::Robot;
use morphbot_runtime::{FrameClock, InputState};
use morphbot_scene::DrawList;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

pub struct ViewerApp {
    config: ViewerConfig,
    robot: Robot,
    controls: Controls,
    input: InputState,
    clock: FrameClock,
    camera: ViewCamera,
    draw_list: DrawList,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    frame_renderer: Option<FrameRenderer>,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig, robot: Robot) -> Self {
        let camera = ViewCamera {
            view_x: config.camera.view_x,
            view_y: config.camera.view_y,
            view_z: config.camera.view_z,
            fov: config.camera.fov,
            near: config.camera.near,
            far: config.camera.far,
            ..ViewCamera::default()
        };
        Self {
            controls: Controls::new(&config),
            clock: FrameClock::new(config.animation.frame_delay()),
            input: InputState::new(),
            camera,
            draw_list: DrawList::new(),
            robot,
            config,
            window: None,
            render_context: None,
            frame_renderer: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());

        let render_context =
            pollster::block_on(RenderContext::new(window, self.config.window.vsync))?;
        let frame_renderer =
            FrameRenderer::new(&render_context, self.config.render.clear_color());

        self.render_context = Some(render_context);
        self.frame_renderer = Some(frame_renderer);
        tracing::info!("viewer initialized");
        Ok(())
    }

    /// Run controls, record the robot and draw it
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let outcome = self
            .controls
            .update(&self.input, &mut self.robot, &mut self.camera);
        self.input.end_frame();
        if outcome.exit {
            event_loop.exit();
            return;
        }

        self.draw_list.clear();
        self.robot.render(&mut self.draw_list);

        if let (Some(context), Some(renderer)) =
            (&mut self.render_context, &mut self.frame_renderer)
        {
            if let Err(e) = renderer.render(context, &self.camera, &self.draw_list) {
                tracing::error!(error = %e, "render failed");
                event_loop.exit();
                return;
            }
        }

        self.clock.tick();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                tracing::error!(error = %e, "failed to initialize viewer");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                }
            }

            WindowEvent::Focused(false) => {
                self.input.release_all();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.input.process_key_down(key_code),
                        ElementState::Released => self.input.process_key_up(key_code),
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_mouse_move(position.x, position.y);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let btn = match button {
                    MouseButton::Left => 0,
                    MouseButton::Right => 1,
                    MouseButton::Middle => 2,
                    _ => return,
                };

                match state {
                    ElementState::Pressed => self.input.process_mouse_button_down(btn),
                    ElementState::Released => self.input.process_mouse_button_up(btn),
                }
            }

            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.clock.is_frame_due(Instant::now()) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_frame_at()));
        }
    }
}
