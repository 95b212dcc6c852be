//! Behaviors - per-element update rules run by the world pass
//!
//! Each family of element codes implements [`Behavior`]; the registry picks
//! the family from the [`BehaviorKind`] stored in the element table. A rule
//! sees one tile through [`UpdateContext`] and reports whether it changed
//! anything on the grid.

mod common;
mod creature;
mod explosive;
mod machinery;
mod player;
mod projectile;
mod transport;
mod weapon;

pub use creature::CreatureBehavior;
pub use explosive::ExplosiveBehavior;
pub use machinery::MachineryBehavior;
pub use player::{PlayerBehavior, LOOK_DOWN, LOOK_RIGHT, WALK_FRAME_BIT};
pub use projectile::ProjectileBehavior;
pub use transport::TransportBehavior;
pub use weapon::WeaponBehavior;

use crate::core::RandomSource;
use crate::domain::config::EngineSettings;
use crate::domain::content::ElementTable;
use crate::domain::input::EventSource;
use crate::domain::sound::SoundCue;
use crate::domain::state::PlayState;
use crate::elements::{BehaviorKind, ElementCode};
use crate::grid::Grid;

/// Everything one behavior call may read or mutate.
pub struct UpdateContext<'a> {
    pub grid: &'a mut Grid,
    pub table: &'a ElementTable,
    pub surprises: &'a [ElementCode],
    pub state: &'a mut PlayState,
    pub settings: &'a EngineSettings,
    pub rng: &'a mut dyn RandomSource,
    pub events: &'a mut dyn EventSource,
    pub cues: &'a mut Vec<SoundCue>,
    /// Tile being processed and its (unguarded) code.
    pub tile: usize,
    pub code: ElementCode,
    pub x: u32,
    pub y: u32,
}

impl<'a> UpdateContext<'a> {
    /// Index delta of one row.
    #[inline]
    pub fn row(&self) -> isize {
        self.grid.row()
    }

    #[inline]
    pub fn here(&self) -> isize {
        self.tile as isize
    }

    #[inline]
    pub fn get(&self, tile: isize) -> ElementCode {
        self.grid.get(tile)
    }

    #[inline]
    pub fn set(&mut self, tile: isize, code: ElementCode) {
        self.grid.set(tile, code);
    }

    #[inline]
    pub fn cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    #[inline]
    pub fn random(&mut self, n: u32) -> u32 {
        self.rng.below(n)
    }

    #[inline]
    pub fn is_shootable(&self, code: ElementCode) -> bool {
        self.table.is_shootable(code)
    }
}

/// Behavior trait - each element family implements this
pub trait Behavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool;
}

/// Behavior registry - dispatch by kind
pub struct BehaviorRegistry {
    player: PlayerBehavior,
    transport: TransportBehavior,
    machinery: MachineryBehavior,
    explosive: ExplosiveBehavior,
    creature: CreatureBehavior,
    weapon: WeaponBehavior,
    projectile: ProjectileBehavior,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self {
            player: PlayerBehavior::new(),
            transport: TransportBehavior::new(),
            machinery: MachineryBehavior::new(),
            explosive: ExplosiveBehavior::new(),
            creature: CreatureBehavior::new(),
            weapon: WeaponBehavior::new(),
            projectile: ProjectileBehavior::new(),
        }
    }

    /// Dispatch update to the family owning `kind`
    pub fn update(&self, kind: BehaviorKind, ctx: &mut UpdateContext) -> bool {
        use BehaviorKind::*;
        match kind {
            Player | PlayerInShip | AliveMarker => self.player.update(ctx),
            Teleport | MagnetLeft | Attracted => self.transport.update(ctx),
            Ship | ShipActive | Barrier => self.machinery.update(ctx),
            Bomb | Surprise => self.explosive.update(ctx),
            Creature | Eyes => self.creature.update(ctx),
            Cannon | RotatingCannon | MovingCannon | Laser | Blaster => self.weapon.update(ctx),
            Bullet | Beam | Blast | InertBox => self.projectile.update(ctx),
        }
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Single-tile harness for behavior tests.

    use super::*;
    use crate::core::SequenceRng;
    use crate::domain::content::{LevelPack, PackBuilder};
    use crate::domain::input::{EventQueue, InputEvent};
    use crate::elements::EL_SPACE;

    pub struct Bench {
        pub grid: Grid,
        pub pack: LevelPack,
        pub state: PlayState,
        pub settings: EngineSettings,
        pub rng: SequenceRng,
        pub events: EventQueue,
        pub cues: Vec<SoundCue>,
        registry: BehaviorRegistry,
    }

    impl Bench {
        /// 8x6 grid of space with the stock rules.
        pub fn new() -> Self {
            let pack = PackBuilder::new().standard_rules().cave(&[], 0).build().unwrap();
            Self {
                grid: Grid::filled(8, 6, EL_SPACE),
                pack,
                state: PlayState::new(8, 6),
                settings: EngineSettings::default(),
                rng: SequenceRng::constant(1),
                events: EventQueue::new(),
                cues: Vec::new(),
                registry: BehaviorRegistry::new(),
            }
        }

        pub fn with_rng(mut self, draws: Vec<u32>) -> Self {
            self.rng = SequenceRng::new(draws);
            self
        }

        pub fn put(&mut self, x: u32, y: u32, code: ElementCode) -> usize {
            self.grid.set_xy(x, y, code);
            self.grid.index(x, y)
        }

        pub fn at(&self, x: u32, y: u32) -> ElementCode {
            self.grid.get_xy(x, y)
        }

        pub fn push_event(&mut self, event: InputEvent) {
            self.events.push(event);
        }

        /// Runs the behavior of the tile at (x, y) once, without the ambient successor.
        pub fn run(&mut self, x: u32, y: u32) -> bool {
            let tile = self.grid.index(x, y);
            let code = self.grid.tiles[tile];
            let kind = self
                .pack
                .table()
                .entry(code)
                .and_then(|info| info.behavior)
                .expect("tile has a behavior");
            let mut ctx = UpdateContext {
                grid: &mut self.grid,
                table: self.pack.table(),
                surprises: self.pack.surprises(),
                state: &mut self.state,
                settings: &self.settings,
                rng: &mut self.rng,
                events: &mut self.events,
                cues: &mut self.cues,
                tile,
                code,
                x,
                y,
            };
            self.registry.update(kind, &mut ctx)
        }
    }
}
