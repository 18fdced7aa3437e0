pub(crate) mod internal_game_loop;
#[cfg(pump_events)]
pub(crate) mod platform;
