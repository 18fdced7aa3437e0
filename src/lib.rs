//! Windowed OpenGL bootstrap with a fixed-timestep game loop.
//!
//! [`Application`] opens a window with a current OpenGL core context and drives a
//! [`Game`] through [`FixedTimestep`]: simulation at a constant rate, rendering
//! once per presented frame.

pub mod application_context;
pub mod common;
mod internal;
mod utils;

pub use application_context::ApplicationContext;
pub use common::{
    application_builder::ApplicationBuilder,
    color::Color,
    errors::{GameError, GlError, SteadyError},
    game::Game,
    logging::{init_logging, LoggingConfig},
    timestep::{Clock, FixedTimestep, LoopHooks, LoopState, LoopStats, SystemClock},
};

pub struct Application {
    builder: ApplicationBuilder,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::default()
    }

    fn new(builder: ApplicationBuilder) -> Self {
        Self { builder }
    }

    /// Opens the window and runs `game` until it exits, the window is closed, or a
    /// callback fails.
    ///
    /// The window and GL context are released before this returns, on every path.
    #[cfg(pump_events)]
    pub fn run<G>(self, mut game: G) -> Result<(), SteadyError>
    where
        G: Game,
    {
        use internal::{
            internal_game_loop::{GameDriver, Presenter},
            platform::Platform,
        };
        use tracing::info;

        let timestep = self.builder.timestep();
        let report_frame_rate = self.builder.report_frame_rate;
        let background_color = self.builder.background_color;

        let mut platform = Platform::new(self.builder)?;
        let mut context = ApplicationContext::new(background_color, platform.framebuffer_size());
        game.setup(&mut context).map_err(SteadyError::Game)?;

        let result = {
            let mut driver =
                GameDriver::new(&mut game, &mut platform, &mut context, report_frame_rate);
            timestep.run(&mut SystemClock::new(), &mut driver)
        };
        game.teardown(&mut context);

        let stats = result?;
        info!(
            "loop stopped after {} frames and {} steps in {:.2?}",
            stats.iterations, stats.steps, stats.elapsed
        );
        Ok(())
    }

    #[cfg(not(pump_events))]
    pub fn run<G>(self, _game: G) -> Result<(), SteadyError>
    where
        G: Game,
    {
        Err(SteadyError::UnsupportedPlatform)
    }
}
