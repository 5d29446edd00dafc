/// Block types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so block semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlockType {
    Grass,   // Solid, cleared without reward
    Dirt,    // Solid, cleared without reward
    Stone,   // Solid + Resource
    Wood,    // Solid + Resource
    Diamond, // Solid + Resource
    Lava,    // Hazard: walkable into, never minable
    Empty,
}

/// Collectable resources counted by the inventory.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Resource {
    Wood,
    Stone,
    Diamond,
}

impl BlockType {
    /// Does this block stop movement?
    pub fn is_solid(self) -> bool {
        !matches!(self, BlockType::Empty | BlockType::Lava)
    }

    /// Can the player stand in this cell?
    pub fn is_passable(self) -> bool {
        matches!(self, BlockType::Empty)
    }

    /// Does entering this cell trigger a phase reset?
    pub fn is_hazard(self) -> bool {
        matches!(self, BlockType::Lava)
    }

    /// Is this block cleared by a mine action?
    pub fn is_minable(self) -> bool {
        self.is_solid()
    }

    /// Resource gained when this block is mined, if any.
    pub fn resource(self) -> Option<Resource> {
        match self {
            BlockType::Wood => Some(Resource::Wood),
            BlockType::Stone => Some(Resource::Stone),
            BlockType::Diamond => Some(Resource::Diamond),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockType::Grass => "grass",
            BlockType::Dirt => "dirt",
            BlockType::Stone => "stone",
            BlockType::Wood => "wood",
            BlockType::Diamond => "diamond",
            BlockType::Lava => "lava",
            BlockType::Empty => "empty",
        }
    }
}

impl Resource {
    pub fn name(self) -> &'static str {
        match self {
            Resource::Wood => "wood",
            Resource::Stone => "stone",
            Resource::Diamond => "diamond",
        }
    }
}

/// One grid cell. Coordinates mirror the cell's index in the grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Block {
    pub kind: BlockType,
    pub x: usize,
    pub y: usize,
}

impl Block {
    pub fn new(kind: BlockType, x: usize, y: usize) -> Self {
        Block { kind, x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BlockType; 7] = [
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Wood,
        BlockType::Diamond,
        BlockType::Lava,
        BlockType::Empty,
    ];

    #[test]
    fn only_empty_and_lava_are_not_solid() {
        for kind in ALL {
            let expected = !matches!(kind, BlockType::Empty | BlockType::Lava);
            assert_eq!(kind.is_solid(), expected, "{}", kind.name());
        }
    }

    #[test]
    fn only_empty_is_passable() {
        let passable: Vec<_> = ALL.iter().filter(|k| k.is_passable()).collect();
        assert_eq!(passable, vec![&BlockType::Empty]);
    }

    #[test]
    fn resources_come_from_wood_stone_diamond() {
        assert_eq!(BlockType::Wood.resource(), Some(Resource::Wood));
        assert_eq!(BlockType::Stone.resource(), Some(Resource::Stone));
        assert_eq!(BlockType::Diamond.resource(), Some(Resource::Diamond));
        assert_eq!(BlockType::Grass.resource(), None);
        assert_eq!(BlockType::Dirt.resource(), None);
        assert_eq!(BlockType::Lava.resource(), None);
    }

    #[test]
    fn lava_is_hazard_and_not_minable() {
        assert!(BlockType::Lava.is_hazard());
        assert!(!BlockType::Lava.is_minable());
        assert!(!BlockType::Empty.is_minable());
        assert!(BlockType::Grass.is_minable());
    }
}
