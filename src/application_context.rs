use crate::{common::color::Color, utils::tracked::Tracked};

/// Per-run state handed to every [`Game`](crate::common::game::Game) callback.
///
/// Window changes are buffered as commands and applied when the frame is presented.
pub struct ApplicationContext {
    output_commands: Vec<Command>,
    background_color: Tracked<Color>,
    framebuffer_size: (u32, u32),
    frame_rate: Option<f64>,
    simulation_steps: u64,
}

impl ApplicationContext {
    pub(crate) fn new(background_color: Color, framebuffer_size: (u32, u32)) -> Self {
        Self {
            output_commands: Vec::new(),
            background_color: Tracked::new(background_color),
            framebuffer_size,
            frame_rate: None,
            simulation_steps: 0,
        }
    }

    pub(crate) fn pop_all_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.output_commands)
    }

    /// Stops the loop once the current frame has been presented.
    pub fn exit(&mut self) {
        self.output_commands.push(Command::Exit);
    }

    pub fn set_cursor_visible(&mut self, enable: bool) {
        self.output_commands.push(Command::CursorVisible(enable));
    }

    pub fn set_title<T>(&mut self, title: T)
    where
        T: Into<String>,
    {
        self.output_commands.push(Command::Title(title.into()));
    }

    pub fn set_background_color(&mut self, red: u8, green: u8, blue: u8, alpha: u8) {
        self.background_color
            .set(Color::from_rgba8(red, green, blue, alpha));
    }

    pub fn background_color(&self) -> Color {
        *self.background_color.get()
    }

    /// Drawable size in physical pixels as of the last event poll.
    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.framebuffer_size
    }

    /// Frames per second over the last full second, once one has elapsed.
    pub fn frame_rate(&self) -> Option<f64> {
        self.frame_rate
    }

    pub fn simulation_steps(&self) -> u64 {
        self.simulation_steps
    }

    pub(crate) fn resize(&mut self, framebuffer_size: (u32, u32)) {
        self.framebuffer_size = framebuffer_size;
    }

    pub(crate) fn set_frame_rate(&mut self, fps: f64) {
        self.frame_rate = Some(fps);
    }

    pub(crate) fn count_step(&mut self) {
        self.simulation_steps += 1;
    }

    /// Background color to send to GL, if it changed since the last frame.
    pub(crate) fn take_background_change(&mut self) -> Option<Color> {
        self.background_color.take_change().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Exit,
    CursorVisible(bool),
    Title(String),
}
