use imgui::*;

use crate::config::{self, AppConfig, BannerConfig, OverlayConfig};
use crate::support::overlay::OverlayFonts;

/// Everything drawn in one frame: the demo window, the "Hello" panel and the
/// banner line on the background.
pub struct Gui {
    overlay: OverlayConfig,
    banner: BannerConfig,
    banner_color: [f32; 4],
    banner_font: FontId,
}

impl Gui {
    pub fn new(config: &AppConfig, fonts: OverlayFonts) -> Self {
        Gui {
            overlay: config.overlay.clone(),
            banner: config.banner.clone(),
            banner_color: config::to_rgba_f32(config.banner.color),
            banner_font: fonts.banner,
        }
    }

    /// Clears `run` when the user asks to quit.
    pub fn draw(&mut self, run: &mut bool, ui: &Ui) {
        if self.overlay.close_on_escape && ui.is_key_pressed(Key::Escape) {
            log::info!("Escape pressed, closing");
            *run = false;
        }

        self.draw_demo_window(ui);
        self.draw_hello_panel(ui);
        self.draw_banner(ui);
    }

    fn draw_demo_window(&self, ui: &Ui) {
        if !self.overlay.show_demo_window {
            return;
        }
        let mut open = true;
        ui.show_demo_window(&mut open);
    }

    fn draw_hello_panel(&self, ui: &Ui) {
        let mut open = true;
        if let Some(_panel) = ui.window(&self.overlay.panel_title)
            .opened(&mut open)
            .begin()
        {
            ui.text(&self.overlay.panel_text);
        }
    }

    fn draw_banner(&self, ui: &Ui) {
        let _font = ui.push_font(self.banner_font);
        ui.get_background_draw_list().add_text(
            [self.banner.x, self.banner.y],
            self.banner_color,
            &self.banner.text,
        );
    }
}
