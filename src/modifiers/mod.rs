//! The three modifier families and their catalog metadata.
//!
//! Every match runs with exactly one modifier from each family, fixed for the
//! match's lifetime and re-rolled only between matches. Family indices are
//! wire-stable: they are what `net::SetupMessage` carries between peers.

use std::fmt;

use once_cell::sync::Lazy;
use rand::Rng;

/// Determines initial placement of the pieces. Affects nothing after setup.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SetupModifier {
    Normal,
    Scrambled,
    ScrambledTwo,
    Random,
    RandomTwo,
    ArmyOfPawns,
    ArmyOfRooks,
    ArmyOfKnights,
    ArmyOfBishops,
    ArmyOfQueens,
    Reversed,
}

/// Changes move generation, capture resolution, or check exemptions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MovementModifier {
    Normal,
    Horsepower,
    Shortsighted,
    Duel,
    PieceGame,
    Scouts,
    Untouchable,
    DivineBirthright,
    RoyalPower,
    Medusa,
    Cooldown,
}

/// Changes how the match can be won.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WinModifier {
    Normal,
    Elimination,
    Ascension,
    Escort,
    Survival,
}

impl SetupModifier {
    pub const ALL: [SetupModifier; 11] = [
        SetupModifier::Normal,
        SetupModifier::Scrambled,
        SetupModifier::ScrambledTwo,
        SetupModifier::Random,
        SetupModifier::RandomTwo,
        SetupModifier::ArmyOfPawns,
        SetupModifier::ArmyOfRooks,
        SetupModifier::ArmyOfKnights,
        SetupModifier::ArmyOfBishops,
        SetupModifier::ArmyOfQueens,
        SetupModifier::Reversed,
    ];

    pub fn index(&self) -> u8 {
        Self::ALL.iter().position(|m| m == self).unwrap() as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            SetupModifier::Normal => "Normal Setup",
            SetupModifier::Scrambled => "Scrambled",
            SetupModifier::ScrambledTwo => "Scrambled II",
            SetupModifier::Random => "Random",
            SetupModifier::RandomTwo => "Random II",
            SetupModifier::ArmyOfPawns => "Army of Pawns",
            SetupModifier::ArmyOfRooks => "Army of Rooks",
            SetupModifier::ArmyOfKnights => "Army of Knights",
            SetupModifier::ArmyOfBishops => "Army of Bishops",
            SetupModifier::ArmyOfQueens => "Army of Queens",
            SetupModifier::Reversed => "Reversed",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SetupModifier::Normal => "No setup modifier",
            SetupModifier::Scrambled => "Back row has random placements",
            SetupModifier::ScrambledTwo => "All pieces have random placements",
            SetupModifier::Random => "Back row is random",
            SetupModifier::RandomTwo => "All pieces are random",
            SetupModifier::ArmyOfPawns => "Back row replaced with pawns",
            SetupModifier::ArmyOfRooks => "Back row replaced with rooks",
            SetupModifier::ArmyOfKnights => "Back row replaced with knights",
            SetupModifier::ArmyOfBishops => "Back row replaced with bishops",
            SetupModifier::ArmyOfQueens => "Back row replaced with queens",
            SetupModifier::Reversed => "Back row and front row are swapped",
        }
    }
}

impl MovementModifier {
    pub const ALL: [MovementModifier; 11] = [
        MovementModifier::Normal,
        MovementModifier::Horsepower,
        MovementModifier::Shortsighted,
        MovementModifier::Duel,
        MovementModifier::PieceGame,
        MovementModifier::Scouts,
        MovementModifier::Untouchable,
        MovementModifier::DivineBirthright,
        MovementModifier::RoyalPower,
        MovementModifier::Medusa,
        MovementModifier::Cooldown,
    ];

    pub fn index(&self) -> u8 {
        Self::ALL.iter().position(|m| m == self).unwrap() as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            MovementModifier::Normal => "Normal Gameplay",
            MovementModifier::Horsepower => "Horsepower",
            MovementModifier::Shortsighted => "Shortsighted",
            MovementModifier::Duel => "Duel",
            MovementModifier::PieceGame => "Piece Game",
            MovementModifier::Scouts => "Scouts",
            MovementModifier::Untouchable => "Untouchable",
            MovementModifier::DivineBirthright => "Divine Birthright",
            MovementModifier::RoyalPower => "Royal Power",
            MovementModifier::Medusa => "Medusa",
            MovementModifier::Cooldown => "Cooldown",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MovementModifier::Normal => "No gameplay modifier",
            MovementModifier::Horsepower => "Knights have improved moveset",
            MovementModifier::Shortsighted => "Pieces can only travel up to 3 squares per move",
            MovementModifier::Duel => "Pieces except king die when capturing other pieces",
            MovementModifier::PieceGame => "Pieces upgrade upon capturing another piece",
            MovementModifier::Scouts => "Pawns can move forward any number of squares",
            MovementModifier::Untouchable => "Queens can only be taken by other queens",
            MovementModifier::DivineBirthright => "Kings can move like queens",
            MovementModifier::RoyalPower => "Pawns can only take other pawns",
            MovementModifier::Medusa => "Tiles trap pieces after being moved to/from 15 times",
            MovementModifier::Cooldown => "Pieces cannot be moved two turns in a row",
        }
    }
}

impl WinModifier {
    pub const ALL: [WinModifier; 5] = [
        WinModifier::Normal,
        WinModifier::Elimination,
        WinModifier::Ascension,
        WinModifier::Escort,
        WinModifier::Survival,
    ];

    pub fn index(&self) -> u8 {
        Self::ALL.iter().position(|m| m == self).unwrap() as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Elimination and Survival redefine victory entirely: moving into or
    /// remaining in "check" is legal, and check is never evaluated.
    pub fn ignores_self_check(&self) -> bool {
        matches!(self, WinModifier::Elimination | WinModifier::Survival)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WinModifier::Normal => "Normal Win",
            WinModifier::Elimination => "Elimination",
            WinModifier::Ascension => "Ascension",
            WinModifier::Escort => "Escort",
            WinModifier::Survival => "Survival",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WinModifier::Normal => "No win condition modifiers",
            WinModifier::Elimination => "Take all enemy pieces to win",
            WinModifier::Ascension => "Pawn promotion also wins game",
            WinModifier::Escort => "King crossing center row also wins game",
            WinModifier::Survival => "Most surviving pieces after 30 turns wins",
        }
    }
}

macro_rules! impl_modifier_display {
    ($($modifier:ty),*) => {
        $(impl fmt::Display for $modifier {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        })*
    };
}

impl_modifier_display!(SetupModifier, MovementModifier, WinModifier);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ModifierFamily {
    Setup,
    Movement,
    Win,
}

/// Textual metadata for one modifier, as shown in the mod description UI.
#[derive(Clone, Copy, Debug)]
pub struct ModifierInfo {
    pub name: &'static str,
    pub description: &'static str,
}

static CATALOG: Lazy<[Vec<ModifierInfo>; 3]> = Lazy::new(|| {
    fn info(name: &'static str, description: &'static str) -> ModifierInfo {
        ModifierInfo { name, description }
    }
    [
        SetupModifier::ALL
            .iter()
            .map(|m| info(m.name(), m.description()))
            .collect(),
        MovementModifier::ALL
            .iter()
            .map(|m| info(m.name(), m.description()))
            .collect(),
        WinModifier::ALL
            .iter()
            .map(|m| info(m.name(), m.description()))
            .collect(),
    ]
});

/// All metadata entries for one family, indexed by modifier index.
pub fn catalog(family: ModifierFamily) -> &'static [ModifierInfo] {
    match family {
        ModifierFamily::Setup => &CATALOG[0],
        ModifierFamily::Movement => &CATALOG[1],
        ModifierFamily::Win => &CATALOG[2],
    }
}

pub fn family_len(family: ModifierFamily) -> usize {
    catalog(family).len()
}

/// Exactly one active modifier per family, immutable for a whole match.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ModifierSet {
    pub setup: SetupModifier,
    pub movement: MovementModifier,
    pub win: WinModifier,
}

impl ModifierSet {
    pub const STANDARD: ModifierSet = ModifierSet {
        setup: SetupModifier::Normal,
        movement: MovementModifier::Normal,
        win: WinModifier::Normal,
    };

    /// Random selection for a fresh match, one roll per family.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        ModifierSet {
            setup: SetupModifier::ALL[rng.gen_range(0..SetupModifier::ALL.len())],
            movement: MovementModifier::ALL[rng.gen_range(0..MovementModifier::ALL.len())],
            win: WinModifier::ALL[rng.gen_range(0..WinModifier::ALL.len())],
        }
    }

    pub fn indices(&self) -> (u8, u8, u8) {
        (
            self.setup.index(),
            self.movement.index(),
            self.win.index(),
        )
    }

    pub fn from_indices(setup: u8, movement: u8, win: u8) -> Option<Self> {
        Some(ModifierSet {
            setup: SetupModifier::from_index(setup)?,
            movement: MovementModifier::from_index(movement)?,
            win: WinModifier::from_index(win)?,
        })
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.setup, self.movement, self.win)
    }
}
