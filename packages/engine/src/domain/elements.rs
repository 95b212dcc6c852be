//! Element codes - one byte per tile
//!
//! Values 0x00..=0x7F identify what occupies a tile. Bit 7 is the transient
//! "processed this pass" guard; the one exception is `EL_WALL` (0xA0), the
//! 8-bit wall code stored directly in cave templates.

pub type ElementCode = u8;

/// Guard bit set on a tile written ahead of the raster cursor.
pub const PROCESSED_BIT: ElementCode = 0x80;
pub const CODE_MASK: ElementCode = 0x7F;

/// Number of slots in the element table (every byte value).
pub const ELEMENT_SLOTS: usize = 256;
/// Number of codes described by the info table.
pub const ELEMENT_CODES: usize = 128;

// === Terrain ===
pub const EL_WALL_ALT: ElementCode = 0x00;
pub const EL_WALL: ElementCode = 0xA0;
pub const EL_SPACE: ElementCode = 0x20;
pub const EL_COSMOS: ElementCode = 0x13;
pub const EL_BARRIER: ElementCode = 0x0F;
pub const EL_BARRIER_LT: ElementCode = 0x11;
pub const EL_BARRIER_RT: ElementCode = 0x05;

// === Player ===
pub const EL_PLAYER: ElementCode = 0x2A;
pub const EL_PLAYER_IN_SHIP: ElementCode = 0x1B;
pub const EL_PLAYER_ATTRACTED_LT: ElementCode = 0x0B;
pub const EL_PLAYER_ATTRACTED_RT: ElementCode = 0x0C;

// === Ship ===
pub const EL_SHIP: ElementCode = 0x14;
pub const EL_SHIP_ACTIVE: ElementCode = 0x15;
pub const EL_SHIP_ACTIVE_ALT: ElementCode = 0x16;

// === Pickups and props ===
pub const EL_LIFE: ElementCode = 0x2B;
pub const EL_KEY: ElementCode = 0x3D;
pub const EL_SCREW: ElementCode = 0x24;
pub const EL_AMMO: ElementCode = 0x21;
pub const EL_BOX: ElementCode = 0x23;
pub const EL_BOMB: ElementCode = 0x40;
pub const EL_QUESTION: ElementCode = 0x3F;
pub const EL_QUESTION_SURPRISE: ElementCode = 0x3A;
pub const EL_DOOR_V: ElementCode = 0x7C;
pub const EL_DOOR_H: ElementCode = 0x12;
pub const EL_MAGNET_LT: ElementCode = 0x28;
pub const EL_MAGNET_RT: ElementCode = 0x29;
pub const EL_EYES: ElementCode = 0x26;

pub const EL_INERT_BOX: ElementCode = 0x06;
pub const EL_INERT_BOX_LT: ElementCode = 0x07;
pub const EL_INERT_BOX_RT: ElementCode = 0x08;
pub const EL_INERT_BOX_UP: ElementCode = 0x09;
pub const EL_INERT_BOX_DN: ElementCode = 0x0A;

pub const EL_TELEPORT_0: ElementCode = 0x30;
pub const EL_TELEPORT_9: ElementCode = 0x39;

// === Creatures ===
pub const EL_CREATURE_LH_UP: ElementCode = 0x41;
pub const EL_CREATURE_LH_DN: ElementCode = 0x42;
pub const EL_CREATURE_LH_RT: ElementCode = 0x43;
pub const EL_CREATURE_LH_LT: ElementCode = 0x44;
pub const EL_CREATURE_RH_DN: ElementCode = 0x45;
pub const EL_CREATURE_RH_UP: ElementCode = 0x46;
pub const EL_CREATURE_RH_LT: ElementCode = 0x47;
pub const EL_CREATURE_RH_RT: ElementCode = 0x48;
pub const EL_CREATURE_HV_LT: ElementCode = 0x49;
pub const EL_CREATURE_HV_RT: ElementCode = 0x4A;
pub const EL_CREATURE_HV_UP: ElementCode = 0x4B;
pub const EL_CREATURE_HV_DN: ElementCode = 0x4C;
pub const EL_CREATURE_HS_LT: ElementCode = 0x4D;
pub const EL_CREATURE_HS_RT: ElementCode = 0x4E;

// === Projectiles ===
pub const EL_BULLET_LT: ElementCode = 0x4F;
pub const EL_BULLET_RT: ElementCode = 0x50;
pub const EL_BULLET_UP: ElementCode = 0x51;
pub const EL_BULLET_DN: ElementCode = 0x52;

pub const EL_BEAM_LT: ElementCode = 0x53;
pub const EL_BEAM_RT: ElementCode = 0x54;
pub const EL_BEAM_UP: ElementCode = 0x55;
pub const EL_BEAM_DN: ElementCode = 0x56;
pub const EL_BEAM_V: ElementCode = 0x5B;
pub const EL_BEAM_H: ElementCode = 0x5D;

pub const EL_BLAST_LT: ElementCode = 0x57;
pub const EL_BLAST_RT: ElementCode = 0x58;
pub const EL_BLAST_UP: ElementCode = 0x59;
pub const EL_BLAST_DN: ElementCode = 0x5A;

// === Guns ===
pub const EL_CANNON_UP: ElementCode = 0x1C;
pub const EL_CANNON_DN: ElementCode = 0x1D;
pub const EL_CANNON_LT: ElementCode = 0x1E;
pub const EL_CANNON_RT: ElementCode = 0x1F;
pub const EL_CANNON_ROT_RT: ElementCode = 0x2C;
pub const EL_CANNON_ROT_DN: ElementCode = 0x2D;
pub const EL_CANNON_ROT_LT: ElementCode = 0x2E;
pub const EL_CANNON_ROT_UP: ElementCode = 0x2F;
pub const EL_CANNON_MOV_RT: ElementCode = 0x0D;
pub const EL_CANNON_MOV_LT: ElementCode = 0x0E;

pub const EL_LASER_DN: ElementCode = 0x27;
pub const EL_LASER_LT: ElementCode = 0x3C;
pub const EL_LASER_RT: ElementCode = 0x3E;
pub const EL_LASER_UP: ElementCode = 0x5E;

pub const EL_BLASTER_RT: ElementCode = 0x01;
pub const EL_BLASTER_LT: ElementCode = 0x04;
pub const EL_BLASTER_DN: ElementCode = 0x17;
pub const EL_BLASTER_UP: ElementCode = 0x18;

// === Animations ===
pub const EL_ANIM_BOMB: ElementCode = 0x60;
pub const EL_ANIM_DISAPPEAR_A: ElementCode = 0x61;
pub const EL_ANIM_DISAPPEAR_B: ElementCode = 0x62;
pub const EL_ANIM_DISAPPEAR_C: ElementCode = 0x63;
pub const EL_ANIM_DISAPPEAR_D: ElementCode = 0x64;
pub const EL_ANIM_DISAPPEAR_F: ElementCode = 0x66;
pub const EL_ANIM_PLAYER_TELEPORT: ElementCode = 0x69;
pub const EL_ANIM_PLAYER_LAND: ElementCode = 0x6A;
pub const EL_ANIM_PLAYER_BACK: ElementCode = 0x6D;
pub const EL_ANIM_QUESTION: ElementCode = 0x6E;
pub const EL_ANIM_PLAYER_ATTRACTED: ElementCode = 0x76;
pub const EL_ANIM_DOOR_OPEN: ElementCode = 0x7A;

/// First and last code that carry an ambient successor in the info table.
pub const ANIM_FIRST: ElementCode = 0x61;
pub const ANIM_LAST: ElementCode = 0x7A;

/// Elements the player can shove into an empty tile.
pub const PUSHABLE: [ElementCode; 7] = [
    EL_CANNON_MOV_RT,
    EL_CANNON_MOV_LT,
    EL_QUESTION,
    EL_BOX,
    EL_SHIP,
    EL_BOMB,
    EL_INERT_BOX,
];

/// Masked codes left standing by the cave demolition sweep.
pub const DEMOLISH_SURVIVORS: [ElementCode; 5] =
    [EL_WALL_ALT, EL_SPACE, EL_COSMOS, EL_BARRIER_LT, EL_BARRIER_RT];

#[inline]
pub fn is_creature(code: ElementCode) -> bool {
    (EL_CREATURE_LH_UP..=EL_CREATURE_HS_RT).contains(&code)
}

#[inline]
pub fn is_teleport(code: ElementCode) -> bool {
    (EL_TELEPORT_0..=EL_TELEPORT_9).contains(&code)
}

#[inline]
pub fn is_pushable(code: ElementCode) -> bool {
    PUSHABLE.contains(&code)
}

#[inline]
pub fn is_processed(code: ElementCode) -> bool {
    code & PROCESSED_BIT != 0
}

/// Sets the guard bit for a forward write (positive delta).
#[inline]
pub fn guard_forward(code: ElementCode, delta: isize) -> ElementCode {
    if delta > 0 {
        code | PROCESSED_BIT
    } else {
        code
    }
}

/// Behavior family assigned to an element code when the table is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BehaviorKind {
    Player,
    PlayerInShip,
    AliveMarker,
    Attracted,
    MagnetLeft,
    Teleport,
    Ship,
    ShipActive,
    Bomb,
    Surprise,
    Barrier,
    Eyes,
    Creature,
    Cannon,
    RotatingCannon,
    MovingCannon,
    Laser,
    Blaster,
    Bullet,
    Beam,
    Blast,
    InertBox,
}

/// Behavior of a (masked) element code, `None` for static elements.
pub fn behavior_kind_for(code: ElementCode) -> Option<BehaviorKind> {
    let kind = match code {
        EL_PLAYER => BehaviorKind::Player,
        EL_PLAYER_IN_SHIP => BehaviorKind::PlayerInShip,
        EL_ANIM_PLAYER_TELEPORT..=EL_ANIM_PLAYER_BACK | EL_ANIM_PLAYER_ATTRACTED => BehaviorKind::AliveMarker,
        EL_PLAYER_ATTRACTED_LT | EL_PLAYER_ATTRACTED_RT => BehaviorKind::Attracted,
        EL_MAGNET_LT => BehaviorKind::MagnetLeft,
        EL_TELEPORT_0..=EL_TELEPORT_9 => BehaviorKind::Teleport,
        EL_SHIP => BehaviorKind::Ship,
        EL_SHIP_ACTIVE | EL_SHIP_ACTIVE_ALT => BehaviorKind::ShipActive,
        EL_ANIM_BOMB => BehaviorKind::Bomb,
        EL_QUESTION_SURPRISE => BehaviorKind::Surprise,
        EL_BARRIER_LT => BehaviorKind::Barrier,
        EL_EYES => BehaviorKind::Eyes,
        EL_CREATURE_LH_UP..=EL_CREATURE_HS_RT => BehaviorKind::Creature,
        EL_CANNON_UP | EL_CANNON_DN | EL_CANNON_LT | EL_CANNON_RT => BehaviorKind::Cannon,
        EL_CANNON_ROT_RT..=EL_CANNON_ROT_UP => BehaviorKind::RotatingCannon,
        EL_CANNON_MOV_RT | EL_CANNON_MOV_LT => BehaviorKind::MovingCannon,
        EL_LASER_UP | EL_LASER_DN | EL_LASER_LT | EL_LASER_RT => BehaviorKind::Laser,
        EL_BLASTER_UP | EL_BLASTER_DN | EL_BLASTER_LT | EL_BLASTER_RT => BehaviorKind::Blaster,
        EL_BULLET_LT..=EL_BULLET_DN => BehaviorKind::Bullet,
        EL_BEAM_LT..=EL_BEAM_DN => BehaviorKind::Beam,
        EL_BLAST_LT..=EL_BLAST_DN => BehaviorKind::Blast,
        EL_INERT_BOX_LT..=EL_INERT_BOX_DN => BehaviorKind::InertBox,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_creature_code_is_a_creature() {
        for code in EL_CREATURE_LH_UP..=EL_CREATURE_HS_RT {
            assert!(is_creature(code));
            assert_eq!(behavior_kind_for(code), Some(BehaviorKind::Creature));
        }
        assert!(!is_creature(EL_BULLET_LT));
    }

    #[test]
    fn static_elements_have_no_behavior() {
        for code in [EL_SPACE, EL_WALL_ALT, EL_BOX, EL_KEY, EL_SCREW, EL_DOOR_V, EL_MAGNET_RT, EL_BOMB] {
            assert_eq!(behavior_kind_for(code), None);
        }
    }

    #[test]
    fn forward_guard_only_for_positive_delta() {
        assert_eq!(guard_forward(EL_PLAYER, 1), EL_PLAYER | PROCESSED_BIT);
        assert_eq!(guard_forward(EL_PLAYER, -16), EL_PLAYER);
    }
}
