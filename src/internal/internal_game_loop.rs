use tracing::{debug, info};

use crate::{
    application_context::{ApplicationContext, Command},
    common::{color::Color, errors::SteadyError, game::Game, timestep::LoopHooks},
};

/// Window-system side of a frame, as seen by [`GameDriver`].
pub(crate) trait Presenter {
    fn close_requested(&self) -> bool;
    fn framebuffer_size(&self) -> (u32, u32);
    /// Clears the framebuffer; `changed` carries a new clear color when there is one.
    fn clear(&mut self, changed: Option<Color>);
    fn apply(&mut self, command: Command);
    fn present_and_poll(&mut self) -> Result<(), SteadyError>;
}

/// Adapts a [`Game`] and a [`Presenter`] to the loop driver's hooks.
pub(crate) struct GameDriver<'a, G, P> {
    game: &'a mut G,
    presenter: &'a mut P,
    context: &'a mut ApplicationContext,
    exit_requested: bool,
    report_frame_rate: bool,
}

impl<'a, G, P> GameDriver<'a, G, P>
where
    G: Game,
    P: Presenter,
{
    pub(crate) fn new(
        game: &'a mut G,
        presenter: &'a mut P,
        context: &'a mut ApplicationContext,
        report_frame_rate: bool,
    ) -> Self {
        Self {
            game,
            presenter,
            context,
            exit_requested: false,
            report_frame_rate,
        }
    }
}

impl<G, P> LoopHooks for GameDriver<'_, G, P>
where
    G: Game,
    P: Presenter,
{
    type Error = SteadyError;

    fn should_stop(&mut self) -> bool {
        self.exit_requested || self.presenter.close_requested()
    }

    fn simulate(&mut self, dt: f64) -> Result<(), SteadyError> {
        self.game
            .simulate(dt, self.context)
            .map_err(SteadyError::Game)?;
        self.context.count_step();
        Ok(())
    }

    fn render(&mut self) -> Result<(), SteadyError> {
        self.presenter.clear(self.context.take_background_change());
        self.game.render(self.context).map_err(SteadyError::Game)
    }

    fn present_and_poll(&mut self) -> Result<(), SteadyError> {
        for command in self.context.pop_all_commands() {
            match command {
                Command::Exit => self.exit_requested = true,
                other => self.presenter.apply(other),
            }
        }
        self.presenter.present_and_poll()?;
        self.context.resize(self.presenter.framebuffer_size());
        Ok(())
    }

    fn frame_rate(&mut self, fps: f64) {
        self.context.set_frame_rate(fps);
        if self.report_frame_rate {
            info!("FPS: {fps:.1}");
        } else {
            debug!("FPS: {fps:.1}");
        }
    }
}
