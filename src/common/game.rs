use super::errors::GameError;
use crate::application_context::ApplicationContext;

/// User code driven by [`Application::run`](crate::Application::run).
///
/// `simulate` runs at the fixed update rate, `render` once per presented frame.
/// Returning an error from any callback stops the loop and surfaces as
/// [`SteadyError::Game`](super::errors::SteadyError::Game).
pub trait Game {
    fn setup(&mut self, _context: &mut ApplicationContext) -> Result<(), GameError> {
        Ok(())
    }

    fn simulate(&mut self, dt: f64, context: &mut ApplicationContext) -> Result<(), GameError>;

    /// Called after the framebuffer has been cleared to the background color.
    fn render(&mut self, _context: &mut ApplicationContext) -> Result<(), GameError> {
        Ok(())
    }

    /// Runs once the loop has stopped, whether it stopped cleanly or not.
    fn teardown(&mut self, _context: &mut ApplicationContext) {}
}
