pub mod application_builder;
pub mod color;
pub mod errors;
pub mod frame_rate;
pub mod game;
pub mod gl;
#[cfg(pump_events)]
pub(crate) mod helpers;
pub mod logging;
pub mod timestep;
