use copypasta::{ClipboardContext, ClipboardProvider};
use imgui::ClipboardBackend;

/// System clipboard exposed to ImGui text widgets.
pub struct ClipboardSupport(ClipboardContext);

pub fn init() -> Option<ClipboardSupport> {
    match ClipboardContext::new() {
        Ok(context) => Some(ClipboardSupport(context)),
        Err(e) => {
            log::warn!("Failed to initialize clipboard: {e}");
            None
        }
    }
}

impl ClipboardBackend for ClipboardSupport {
    fn get(&mut self) -> Option<String> {
        self.0.get_contents().ok()
    }

    fn set(&mut self, text: &str) {
        if let Err(e) = self.0.set_contents(text.to_owned()) {
            log::warn!("Failed to set clipboard contents: {e}");
        }
    }
}
