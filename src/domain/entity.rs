/// Entities and inputs: Player, Inventory, Direction, Command.

use super::tile::Resource;

/// Orthogonal movement direction. No diagonals.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Discrete engine input. One command is resolved per tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Mine,
    Restart,
}

impl Command {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::MoveUp => Some(Direction::Up),
            Command::MoveDown => Some(Direction::Down),
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            Command::Mine | Command::Restart => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Player {
    pub x: usize,
    pub y: usize,
}

impl Player {
    pub fn new(x: usize, y: usize) -> Self {
        Player { x, y }
    }

    pub fn pos(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

/// Resource counters. Only ever incremented within a phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Inventory {
    pub wood: u32,
    pub stone: u32,
    pub diamond: u32,
}

impl Inventory {
    #[cfg(test)]
    pub fn new(wood: u32, stone: u32, diamond: u32) -> Self {
        Inventory { wood, stone, diamond }
    }

    pub fn add(&mut self, resource: Resource) {
        let counter = match resource {
            Resource::Wood => &mut self.wood,
            Resource::Stone => &mut self.stone,
            Resource::Diamond => &mut self.diamond,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn count(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Stone => self.stone,
            Resource::Diamond => self.diamond,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Inventory::default()
    }
}
