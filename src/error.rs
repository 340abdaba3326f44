use imgui_glium_renderer::RendererError;
use imgui_winit_support::winit::error::EventLoopError;

#[derive(Debug)]
pub enum AppError {
    Config(String),
    EventLoop(EventLoopError),
    Renderer(RendererError),
    Swap(glium::SwapBuffersError),
    Platform(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(message) => write!(f, "Configuration error: {message}"),
            AppError::EventLoop(e) => write!(f, "Event loop error: {e}"),
            AppError::Renderer(e) => write!(f, "Renderer error: {e:?}"),
            AppError::Swap(e) => write!(f, "Failed to swap buffers: {e}"),
            AppError::Platform(message) => write!(f, "Platform error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<EventLoopError> for AppError {
    fn from(e: EventLoopError) -> Self {
        AppError::EventLoop(e)
    }
}

impl From<RendererError> for AppError {
    fn from(e: RendererError) -> Self {
        AppError::Renderer(e)
    }
}

impl From<glium::SwapBuffersError> for AppError {
    fn from(e: glium::SwapBuffersError) -> Self {
        AppError::Swap(e)
    }
}
