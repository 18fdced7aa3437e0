use std::time::Duration;

use super::{color::Color, timestep::FixedTimestep};
use crate::Application;

#[derive(Debug, Clone)]
pub struct ApplicationBuilder {
    pub(crate) title: String,
    pub(crate) window_size: (u32, u32),
    pub(crate) window_position: Option<(i32, i32)>,
    pub(crate) resizable: bool,
    pub(crate) gl_version: (u8, u8),
    pub(crate) vsync: bool,
    pub(crate) msaa_samples: Option<u8>,
    pub(crate) mouse_cursor_visible: bool,
    pub(crate) update_rate_hz: u32,
    pub(crate) max_frame_delta: Option<Duration>,
    pub(crate) report_frame_rate: bool,
    pub(crate) background_color: Color,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self {
            title: String::from("steadytick window"),
            window_size: (854, 480),
            window_position: None,
            resizable: true,
            gl_version: (3, 3),
            vsync: true,
            msaa_samples: None,
            mouse_cursor_visible: true,
            update_rate_hz: FixedTimestep::DEFAULT_RATE_HZ,
            max_frame_delta: Some(FixedTimestep::DEFAULT_MAX_FRAME_DELTA),
            report_frame_rate: false,
            background_color: Color::ALICE_BLUE,
        }
    }
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title<T>(mut self, title: T) -> Self
    where
        T: Into<String>,
    {
        self.title = title.into();
        self
    }

    /// Inner size in physical pixels. Zero dimensions are raised to one.
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width.max(1), height.max(1));
        self
    }

    pub fn window_position(mut self, x: i32, y: i32) -> Self {
        self.window_position = Some((x, y));
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Requested OpenGL core profile version.
    pub fn gl_version(mut self, major: u8, minor: u8) -> Self {
        self.gl_version = (major, minor);
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Preferred multisample count. Falls back to the richest available config.
    pub fn msaa_samples(mut self, samples: u8) -> Self {
        self.msaa_samples = Some(samples);
        self
    }

    pub fn set_mouse_cursor_visible(mut self, mouse_cursor_visible: bool) -> Self {
        self.mouse_cursor_visible = mouse_cursor_visible;
        self
    }

    /// Simulation steps per second.
    pub fn update_rate(mut self, rate_hz: u32) -> Self {
        self.update_rate_hz = rate_hz.max(1);
        self
    }

    /// Largest wall-time slice a single frame may feed into the simulation.
    /// `None` removes the cap.
    pub fn max_frame_delta(mut self, max_frame_delta: Option<Duration>) -> Self {
        self.max_frame_delta = max_frame_delta;
        self
    }

    /// Logs the frame rate at `info` once per second instead of `debug`.
    pub fn report_frame_rate(mut self, report: bool) -> Self {
        self.report_frame_rate = report;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub(crate) fn timestep(&self) -> FixedTimestep {
        FixedTimestep::from_hz(self.update_rate_hz).max_frame_delta(self.max_frame_delta)
    }

    pub fn build(self) -> Application {
        Application::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_window() {
        let builder = ApplicationBuilder::new();
        assert_eq!(builder.window_size, (854, 480));
        assert_eq!(builder.gl_version, (3, 3));
        assert!(builder.resizable);
        assert!(builder.vsync);
        assert_eq!(builder.background_color, Color::ALICE_BLUE);
        assert_eq!(builder.timestep(), FixedTimestep::default());
    }

    #[test]
    fn update_rate_and_clamp_feed_the_timestep() {
        let builder = ApplicationBuilder::new()
            .update_rate(120)
            .max_frame_delta(None);
        let timestep = builder.timestep();
        assert_eq!(timestep.step(), Duration::from_secs(1) / 120);
        assert_eq!(timestep, FixedTimestep::from_hz(120).max_frame_delta(None));
    }

    #[test]
    fn degenerate_sizes_and_rates_are_raised() {
        let builder = ApplicationBuilder::new().window_size(0, 0).update_rate(0);
        assert_eq!(builder.window_size, (1, 1));
        assert_eq!(builder.update_rate_hz, 1);
    }
}
