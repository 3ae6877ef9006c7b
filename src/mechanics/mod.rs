//! Special mechanics: Warlock swaps, zombie revival, narc nets,
//! Necromancer freezes, and mystery boxes.

pub mod freeze;
pub mod mystery;
pub mod narc;
pub mod swap;
pub mod zombie;

pub use freeze::{execute_freeze, thaw_pieces, FreezeError};
pub use mystery::{
    apply_effects, available_options, execute_figure_swap, execute_hoplite_sacrifice,
    execute_obstacle_swap, execute_revive_piece, is_selectable_obstacle, phase_for_option,
    random_mystery_box_option, remove_mystery_box, revivable_pieces, roll_dice, BoardEffect,
    MysteryBoxOption, MysteryBoxState, MysteryError, MysteryPhase, Transition,
};
pub use narc::Narc;
pub use swap::{can_initiate_swap, execute_swap, valid_swap_targets, validate_swap, SwapError, SwapKind, SwapTarget};
pub use zombie::{
    plan_revival, revival_guards_in_place, revivable_zombies, revive_placement_target, revive_zombie,
    ReviveError,
};
