use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    /// Orthogonal neighbors in north, east, south, west order.
    pub fn neighbors(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    Stairs,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, TileKind::Floor | TileKind::Stairs)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeyColor {
    Red,
    Blue,
    Green,
}

/// Colors handed out to locked doors, in assignment order.
pub const KEY_PALETTE: [KeyColor; 3] = [KeyColor::Red, KeyColor::Blue, KeyColor::Green];

impl KeyColor {
    fn bit(self) -> u8 {
        match self {
            KeyColor::Red => 0b001,
            KeyColor::Blue => 0b010,
            KeyColor::Green => 0b100,
        }
    }
}

/// Set of key colors held at once. Equal sets always compare equal, so a ring
/// can be used directly as part of a search-state key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyRing(u8);

impl KeyRing {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn holds(self, color: KeyColor) -> bool {
        self.0 & color.bit() != 0
    }

    pub fn with(self, color: KeyColor) -> Self {
        Self(self.0 | color.bit())
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Door {
    pub pos: Pos,
    pub color: KeyColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Key(KeyColor),
    Food,
    Elixir,
    Scroll,
    Weapon,
    Treasure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Zombie,
    Vampire,
    Ghost,
    Ogre,
    Snake,
}
