//! Piece kinds, colours, and obstacle kinds.
//!
//! Each piece kind carries a fixed rules entry: its search value, its
//! capture points, and the base range of its ranged attack (if any).

use serde::{Deserialize, Serialize};

/// A player colour. White moves toward row 0, Black toward the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the other colour.
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row direction in which this colour's Hoplites advance.
    pub const fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    pub fn from_name(s: &str) -> Option<Color> {
        match s {
            "white" => Some(Color::White),
            "black" => Some(Color::Black),
            _ => None,
        }
    }
}

/// The nine piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PieceKind {
    Monarch,
    Duchess,
    RamTower,
    Chariot,
    Paladin,
    Necromancer,
    Warlock,
    Bomber,
    Hoplite,
}

/// Fixed per-kind rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceRules {
    /// Material value used by the evaluator.
    pub value: i32,
    /// Points credited to the capturer.
    pub points: u32,
    /// Base range of the ranged attack; 0 for kinds without one.
    pub attack_range: i32,
    /// Whether the player picks between ranged kill and move-capture.
    pub can_choose_attack_mode: bool,
}

impl PieceKind {
    pub const ALL: [PieceKind; 9] = [
        PieceKind::Monarch,
        PieceKind::Duchess,
        PieceKind::RamTower,
        PieceKind::Chariot,
        PieceKind::Paladin,
        PieceKind::Necromancer,
        PieceKind::Warlock,
        PieceKind::Bomber,
        PieceKind::Hoplite,
    ];

    pub const fn rules(self) -> PieceRules {
        match self {
            PieceKind::Monarch => PieceRules { value: 20000, points: 0, attack_range: 0, can_choose_attack_mode: false },
            PieceKind::Duchess => PieceRules { value: 900, points: 9, attack_range: 0, can_choose_attack_mode: false },
            PieceKind::RamTower => PieceRules { value: 500, points: 5, attack_range: 0, can_choose_attack_mode: false },
            PieceKind::Chariot => PieceRules { value: 330, points: 3, attack_range: 0, can_choose_attack_mode: false },
            PieceKind::Paladin => PieceRules { value: 320, points: 3, attack_range: 0, can_choose_attack_mode: false },
            PieceKind::Necromancer => PieceRules { value: 600, points: 6, attack_range: 4, can_choose_attack_mode: true },
            PieceKind::Warlock => PieceRules { value: 450, points: 5, attack_range: 0, can_choose_attack_mode: false },
            PieceKind::Bomber => PieceRules { value: 350, points: 4, attack_range: 2, can_choose_attack_mode: true },
            PieceKind::Hoplite => PieceRules { value: 100, points: 1, attack_range: 0, can_choose_attack_mode: false },
        }
    }

    /// Material value used by the evaluator.
    pub const fn value(self) -> i32 {
        self.rules().value
    }

    /// Diagram letter (uppercase form).
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Monarch => 'M',
            PieceKind::Duchess => 'D',
            PieceKind::RamTower => 'R',
            PieceKind::Chariot => 'C',
            PieceKind::Paladin => 'P',
            PieceKind::Necromancer => 'N',
            PieceKind::Warlock => 'W',
            PieceKind::Bomber => 'B',
            PieceKind::Hoplite => 'H',
        }
    }

    /// Parses a diagram letter in either case.
    pub fn from_letter(c: char) -> Option<PieceKind> {
        let upper = c.to_ascii_uppercase();
        PieceKind::ALL.into_iter().find(|k| k.letter() == upper)
    }
}

/// Stable identity of a piece across moves, clones, and revivals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// A piece on the board or in a captured list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
    pub is_zombie: bool,
    /// Revivals performed; only meaningful on Necromancers.
    pub revive_count: u32,
    /// Set by a Necromancer freeze; cleared when the owner's next turn ends.
    pub frozen: bool,
}

impl Piece {
    /// Creates a fresh, unmoved piece.
    pub const fn new(id: PieceId, kind: PieceKind, color: Color) -> Self {
        Piece {
            id,
            kind,
            color,
            has_moved: false,
            is_zombie: false,
            revive_count: 0,
            frozen: false,
        }
    }

    /// Points credited for capturing this piece.
    pub fn points(&self) -> u32 {
        let base = self.kind.rules().points;
        if self.is_zombie {
            (base / 2).max(1)
        } else {
            base
        }
    }

    /// Diagram character: uppercase for White, lowercase for Black.
    pub fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

/// Terrain occupying a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObstacleKind {
    Cave,
    Tree,
    Rock,
    River,
    Lake,
    Canyon,
    MysteryBox,
}

impl ObstacleKind {
    /// Placement order used by board generation.
    pub const ALL: [ObstacleKind; 7] = [
        ObstacleKind::Cave,
        ObstacleKind::Tree,
        ObstacleKind::Rock,
        ObstacleKind::River,
        ObstacleKind::Lake,
        ObstacleKind::Canyon,
        ObstacleKind::MysteryBox,
    ];

    pub const fn symbol(self) -> char {
        match self {
            ObstacleKind::Cave => '#',
            ObstacleKind::Tree => '^',
            ObstacleKind::Rock => '*',
            ObstacleKind::River => '~',
            ObstacleKind::Lake => '%',
            ObstacleKind::Canyon => '=',
            ObstacleKind::MysteryBox => '?',
        }
    }

    pub fn from_symbol(c: char) -> Option<ObstacleKind> {
        ObstacleKind::ALL.into_iter().find(|k| k.symbol() == c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_roundtrip_in_both_cases() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind));
            assert_eq!(PieceKind::from_letter(kind.letter().to_ascii_lowercase()), Some(kind));
        }
        assert_eq!(PieceKind::from_letter('x'), None);
    }

    #[test]
    fn letters_do_not_collide_with_obstacles() {
        for kind in PieceKind::ALL {
            assert!(ObstacleKind::from_symbol(kind.letter()).is_none());
            assert!(ObstacleKind::from_symbol(kind.letter().to_ascii_lowercase()).is_none());
        }
    }

    #[test]
    fn zombie_points_are_halved_with_floor_of_one() {
        let mut p = Piece::new(PieceId(1), PieceKind::RamTower, Color::White);
        assert_eq!(p.points(), 5);
        p.is_zombie = true;
        assert_eq!(p.points(), 2);
        let mut h = Piece::new(PieceId(2), PieceKind::Hoplite, Color::Black);
        h.is_zombie = true;
        assert_eq!(h.points(), 1);
    }

    #[test]
    fn only_bomber_and_necromancer_have_ranged_attacks() {
        for kind in PieceKind::ALL {
            let r = kind.rules();
            let ranged = matches!(kind, PieceKind::Bomber | PieceKind::Necromancer);
            assert_eq!(r.attack_range > 0, ranged, "{:?}", kind);
            assert_eq!(r.can_choose_attack_mode, ranged, "{:?}", kind);
        }
    }

    #[test]
    fn opponent_and_forward() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.forward(), -1);
        assert_eq!(Color::Black.forward(), 1);
    }
}
