use std::process::ExitCode;

use steadytick::{
    init_logging, Application, ApplicationContext, Game, GameError, LoggingConfig,
};
use tracing::{error, info};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let app = Application::builder()
        .title("Title")
        .window_size(854, 480)
        .build();

    match app.run(Pulse::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error starting application: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Breathes the background brightness at a fixed rate, independent of the frame rate.
#[derive(Default)]
struct Pulse {
    phase: f64,
}

impl Pulse {
    const PERIOD_SECS: f64 = 4.0;
}

impl Game for Pulse {
    fn setup(&mut self, context: &mut ApplicationContext) -> Result<(), GameError> {
        let (width, height) = context.framebuffer_size();
        info!("drawing into {width}x{height}");
        Ok(())
    }

    fn simulate(&mut self, dt: f64, context: &mut ApplicationContext) -> Result<(), GameError> {
        self.phase = (self.phase + dt / Self::PERIOD_SECS).fract();
        let wave = 0.5 + 0.5 * (self.phase * std::f64::consts::TAU).cos();
        let shade = |base: f64| (base * (0.75 + 0.25 * wave)).round() as u8;
        context.set_background_color(shade(240.0), shade(248.0), shade(255.0), 255);
        Ok(())
    }

    fn teardown(&mut self, context: &mut ApplicationContext) {
        info!("simulated {} steps", context.simulation_steps());
    }
}
