/// Error type returned by [`Game`](super::game::Game) callbacks.
pub type GameError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum SteadyError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("window handle unavailable: {0}")]
    WindowHandle(#[from] raw_window_handle::HandleError),

    #[error("internal engine error: {0}")]
    InternalError(Box<dyn std::error::Error>),

    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::error::Error),

    #[error("improper gl call occurred: {0}")]
    GlError(#[from] GlError),

    #[error("game callback failed: {0}")]
    Game(GameError),

    #[error("event loop exited unexpectedly with code {0}")]
    UnexpectedExit(i32),

    #[error("event loop never delivered a window")]
    WindowNotCreated,

    #[error("this platform cannot poll window events from a game loop")]
    UnsupportedPlatform,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlError {
    #[error("driver reported error 0x{0:04X}")]
    Driver(u32),
}
