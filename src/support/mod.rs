use std::time::Instant;

use glium::backend::glutin::SimpleWindowBuilder;
use glium::glutin::surface::WindowSurface;
use glium::{Display, Surface};
use imgui_glium_renderer::Renderer;
use imgui_winit_support::winit::application::ApplicationHandler;
use imgui_winit_support::winit::event::{Event, WindowEvent};
use imgui_winit_support::winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use imgui_winit_support::winit::window::{Window, WindowId};
use imgui_winit_support::{HiDpiMode, WinitPlatform};

use crate::config::{self, AppConfig};
use crate::error::AppError;
use crate::gui::Gui;

pub mod clipboard;
pub mod overlay;
pub mod pacing;

use overlay::{Overlay, OverlayFonts};
use pacing::FramePacer;

/// Window, GL display and ImGui overlay, ready to run.
pub struct System {
    event_loop: EventLoop<()>,
    window: Window,
    display: Display<WindowSurface>,
    overlay: Overlay,
    platform: WinitPlatform,
    renderer: Renderer,
    pacer: FramePacer,
    clear_color: [f32; 4],
}

impl System {
    pub fn init(config: &AppConfig) -> Result<System, AppError> {
        let event_loop = EventLoop::new()?;
        let (window, display) = SimpleWindowBuilder::new()
            .with_title(&config.window.title)
            .with_inner_size(config.window.width, config.window.height)
            .build(&event_loop);
        log::info!(
            "Created window '{}' ({}x{})",
            config.window.title,
            config.window.width,
            config.window.height
        );

        let mut overlay = Overlay::new(config, window.scale_factor());
        overlay.attach_clipboard();

        let mut platform = WinitPlatform::new(overlay.context_mut());
        platform.attach_window(overlay.io_mut(), &window, HiDpiMode::Default);

        let renderer = Renderer::new(overlay.context_mut(), &display)?;

        let pacer = FramePacer::new(config.window.target_fps, Instant::now());
        match pacer.interval() {
            Some(interval) => log::info!(
                "Targeting {} FPS ({interval:?} per frame)",
                config.window.target_fps
            ),
            None => log::info!("Frame pacing disabled"),
        }

        Ok(System {
            event_loop,
            window,
            display,
            overlay,
            platform,
            renderer,
            pacer,
            clear_color: config::to_rgba_f32(config.background.0),
        })
    }

    pub fn fonts(&self) -> OverlayFonts {
        self.overlay.fonts()
    }

    /// Runs frames until the window is closed, then shuts the overlay down and
    /// closes the window.
    pub fn main_loop(self, gui: Gui) -> Result<(), AppError> {
        let System {
            event_loop,
            window,
            display,
            overlay,
            platform,
            renderer,
            pacer,
            clear_color,
        } = self;

        let mut app = FrameLoop {
            window,
            display,
            overlay,
            platform,
            renderer,
            pacer,
            clear_color,
            gui,
            run: true,
            last_frame: Instant::now(),
            result: Ok(()),
        };
        let loop_result = event_loop.run_app(&mut app);

        let FrameLoop {
            window,
            display,
            overlay,
            platform,
            renderer,
            result,
            ..
        } = app;
        shut_down(overlay, renderer, platform, display, window);

        loop_result?;
        result
    }
}

/// Releases everything in reverse order of creation: the GL objects held by
/// the renderer need the display's context, and the display needs the window.
fn shut_down<R, P, D, W>(overlay: Overlay, renderer: R, platform: P, display: D, window: W) {
    overlay.shutdown();
    drop(renderer);
    drop(platform);
    drop(display);
    drop(window);
    log::info!("Window closed");
}

struct FrameLoop {
    window: Window,
    display: Display<WindowSurface>,
    overlay: Overlay,
    platform: WinitPlatform,
    renderer: Renderer,
    pacer: FramePacer,
    clear_color: [f32; 4],
    gui: Gui,
    run: bool,
    last_frame: Instant,
    result: Result<(), AppError>,
}

impl FrameLoop {
    fn redraw(&mut self) -> Result<(), AppError> {
        let now = Instant::now();
        self.overlay.io_mut().update_delta_time(now - self.last_frame);
        self.last_frame = now;

        let mut target = self.display.draw();
        let [r, g, b, a] = self.clear_color;
        target.clear_color_srgb(r, g, b, a);

        let ui = self.overlay.frame();
        self.gui.draw(&mut self.run, ui);
        self.platform.prepare_render(ui, &self.window);
        let draw_data = self.overlay.render();
        let rendered = self.renderer.render(&mut target, draw_data);

        // The frame has to be finished even when rendering failed.
        target.finish()?;
        rendered?;
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        if self.result.is_ok() {
            self.result = Err(error);
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for FrameLoop {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if self.pacer.is_due(now) {
            if let Err(e) = self.platform.prepare_frame(self.overlay.io_mut(), &self.window) {
                self.fail(event_loop, AppError::Platform(e.to_string()));
                return;
            }
            self.window.request_redraw();
            self.pacer.advance(now);
        }

        match self.pacer.deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Poll),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                    return;
                }
                if !self.run {
                    event_loop.exit();
                }
            }
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if new_size.width > 0 && new_size.height > 0 {
                    log::debug!("Resized to {}x{}", new_size.width, new_size.height);
                    self.display.resize((new_size.width, new_size.height));
                }
            }
            _ => {}
        }

        let event = Event::<()>::WindowEvent { window_id, event };
        self.platform.handle_event(self.overlay.io_mut(), &self.window, &event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use serial_test::serial;

    struct DropLog {
        name: &'static str,
        dropped: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Drop for DropLog {
        fn drop(&mut self) {
            self.dropped.borrow_mut().push(self.name);
        }
    }

    #[test]
    #[serial]
    fn test_shut_down_releases_gpu_objects_before_window() {
        let dropped = Rc::new(RefCell::new(Vec::new()));
        let part = |name| DropLog { name, dropped: Rc::clone(&dropped) };

        let overlay = Overlay::new(&AppConfig::default(), 1.0);
        shut_down(overlay, part("renderer"), part("platform"), part("display"), part("window"));

        assert_eq!(*dropped.borrow(), ["renderer", "platform", "display", "window"]);

        // The ImGui context went first; a new one can be created.
        Overlay::new(&AppConfig::default(), 1.0).shutdown();
    }
}
