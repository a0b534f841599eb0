//! Status flags carried by the player
//!
//! These are stored and restored with the character but no combat rule
//! reads them yet.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u8 {
        const POISONED     = 0x01;
        const SHIELDED     = 0x02;
        const TURN_SKIPPED = 0x04;
    }
}
