use imgui::{Context, DrawData, FontConfig, FontId, FontSource, Io, Ui};

use crate::config::AppConfig;
use super::clipboard;

const DEFAULT_FONT_SIZE: f32 = 13.0;

#[derive(Debug, Clone, Copy)]
pub struct OverlayFonts {
    pub banner: FontId,
}

/// Owns the process-wide ImGui context from setup to shutdown.
pub struct Overlay {
    context: Context,
    fonts: OverlayFonts,
    frames: u64,
}

impl Overlay {
    pub fn new(config: &AppConfig, hidpi_factor: f64) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        if config.overlay.dark_style {
            context.style_mut().use_dark_colors();
        } else {
            context.style_mut().use_light_colors();
        }

        let io = context.io_mut();
        io.display_size = [config.window.width as f32, config.window.height as f32];
        io.font_global_scale = (1.0 / hidpi_factor) as f32;

        // The first font added is the one widgets use.
        add_default_font(&mut context, DEFAULT_FONT_SIZE, hidpi_factor);
        let fonts = OverlayFonts {
            banner: add_default_font(&mut context, config.banner.size, hidpi_factor),
        };
        context.fonts().build_rgba32_texture();

        log::info!("ImGui overlay initialized");
        Overlay { context, fonts, frames: 0 }
    }

    pub fn attach_clipboard(&mut self) {
        if let Some(backend) = clipboard::init() {
            self.context.set_clipboard_backend(backend);
        }
    }

    pub fn fonts(&self) -> OverlayFonts {
        self.fonts
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn io_mut(&mut self) -> &mut Io {
        self.context.io_mut()
    }

    /// Begins a GUI frame. Must be followed by [`Overlay::render`].
    pub fn frame(&mut self) -> &mut Ui {
        self.frames += 1;
        self.context.new_frame()
    }

    /// Ends the current GUI frame.
    pub fn render(&mut self) -> &DrawData {
        self.context.render()
    }

    /// Destroys the context. Returns the number of frames drawn.
    pub fn shutdown(self) -> u64 {
        log::info!("Shutting down ImGui overlay after {} frames", self.frames);
        self.frames
    }
}

fn add_default_font(context: &mut Context, size: f32, hidpi_factor: f64) -> FontId {
    context.fonts().add_font(&[FontSource::DefaultFontData {
        config: Some(FontConfig {
            size_pixels: (size as f64 * hidpi_factor) as f32,
            ..FontConfig::default()
        }),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn run_empty_frames(overlay: &mut Overlay, count: u64) {
        for _ in 0..count {
            let ui = overlay.frame();
            ui.text("frame");
            overlay.render();
        }
    }

    #[test]
    #[serial]
    fn test_shutdown_without_frames() {
        let overlay = Overlay::new(&AppConfig::default(), 1.0);
        assert_eq!(overlay.shutdown(), 0);
    }

    #[test]
    #[serial]
    fn test_shutdown_after_frames() {
        for count in [1, 3] {
            let mut overlay = Overlay::new(&AppConfig::default(), 1.0);
            run_empty_frames(&mut overlay, count);
            assert_eq!(overlay.shutdown(), count);
        }
    }

    #[test]
    #[serial]
    fn test_context_is_released_on_shutdown() {
        let mut first = Overlay::new(&AppConfig::default(), 1.0);
        run_empty_frames(&mut first, 2);
        first.shutdown();

        // Only one context may be alive at a time; this panics if the first leaked.
        let mut second = Overlay::new(&AppConfig::default(), 1.0);
        run_empty_frames(&mut second, 1);
        assert_eq!(second.shutdown(), 1);
    }

    #[test]
    #[serial]
    fn test_display_size_follows_window_config() {
        let mut config = AppConfig::default();
        config.window.width = 1024;
        config.window.height = 768;
        let mut overlay = Overlay::new(&config, 1.0);
        assert_eq!(overlay.io_mut().display_size, [1024.0, 768.0]);
        overlay.shutdown();
    }
}
