/// Events emitted while resolving one command.
/// The presentation layer consumes these for messages and sound.

use crate::domain::tile::{BlockType, Resource};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Moved { x: usize, y: usize },
    Blocked,
    LavaEntered { x: usize, y: usize },
    BlockMined { x: usize, y: usize, kind: BlockType },
    ResourceCollected { resource: Resource },
    NothingToMine,
    PhaseAdvanced,
    AdvanceDeclined,
    Won,
    Restarted,
    /// Command has no effect in the current stage.
    Ignored,
}
