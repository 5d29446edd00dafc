/// Hazard handler: lava entry resets the current phase.
///
/// One transition: notify → regenerate grid for the same phase →
/// player back to spawn. Inventory survives.

use rand::Rng;

use super::notify::Notifier;
use super::world::GameState;
use super::worldgen;

pub const LAVA_MESSAGE: &str = "You fell into the lava! Restarting phase...";

/// `lava` is the cell the player tried to step onto.
pub fn on_lava_entry<R, N>(state: &mut GameState, lava: (usize, usize), rng: &mut R, notifier: &mut N)
where
    R: Rng + ?Sized,
    N: Notifier + ?Sized,
{
    log::info!("{}", hazard_log_line(state, lava));
    notifier.notify(LAVA_MESSAGE);
    let grid = worldgen::generate(state.phase, rng);
    state.respawn(grid);
}

fn hazard_log_line(state: &GameState, (x, y): (usize, usize)) -> String {
    format!("lava hazard in phase {} at ({x}, {y}); resetting phase", state.phase.number())
}
