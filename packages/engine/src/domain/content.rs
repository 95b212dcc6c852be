use std::fmt;

use serde::{Deserialize, Serialize};

use crate::elements::*;

pub const CAVE_WIDTH: u32 = 16;
pub const CAVE_HEIGHT: u32 = 31;
/// Bytes per cave in the pack: the grid plus one trailer row.
pub const CAVE_STRIDE: usize = (CAVE_WIDTH * (CAVE_HEIGHT + 1)) as usize;
pub const CAVE_TILES: usize = (CAVE_WIDTH * CAVE_HEIGHT) as usize;
pub const SURPRISE_COUNT: usize = 32;
const SUCCESSOR_COUNT: usize = (ANIM_LAST - ANIM_FIRST + 1) as usize;
pub const INFO_LEN: usize = ELEMENT_CODES * 2 + SUCCESSOR_COUNT + SURPRISE_COUNT;
/// Cave count of the stock pack; other packs get their own save slot.
pub const STANDARD_CAVE_COUNT: usize = 56;
pub const PALETTE_BYTES: usize = 6;

/// Visual code standing in for "draw the player's current look".
pub const LOOK_PLAYER_MARKER: u8 = 0x06;

const FLAG_SHOOTABLE: u8 = 1;
const FLAG_BLOWABLE: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackError {
    InfoTooShort { actual: usize, expected: usize },
    CavesEmpty,
    CavesMisaligned { len: usize, stride: usize },
    Bundle(String),
    Settings(String),
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackError::InfoTooShort { actual, expected } => {
                write!(f, "element info table has {} bytes, expected {}", actual, expected)
            }
            PackError::CavesEmpty => write!(f, "level pack contains no caves"),
            PackError::CavesMisaligned { len, stride } => {
                write!(f, "cave table length {} is not a multiple of {}", len, stride)
            }
            PackError::Bundle(msg) => write!(f, "invalid level pack bundle: {}", msg),
            PackError::Settings(msg) => write!(f, "invalid engine settings: {}", msg),
        }
    }
}

impl std::error::Error for PackError {}

/// Immutable per-code metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementInfo {
    pub look: Vec<u8>,
    pub wall: bool,
    pub shootable: bool,
    pub blowable: bool,
    pub next: Option<ElementCode>,
    pub behavior: Option<BehaviorKind>,
}

impl ElementInfo {
    pub fn is_animated(&self) -> bool {
        self.look.len() > 1
    }
}

/// Maps the 4x8 charset index of the info table onto the 16x16 tile set.
fn decode_look(raw: u8) -> Vec<u8> {
    let base = raw & CODE_MASK;
    let base = 0x20 | ((base & 0x60) >> 2) | ((base & 0x1E) >> 1);
    let code = (raw & 0x80) | base;
    if (0x25..=0x2A).contains(&base) || (0x2E..=0x2F).contains(&base) {
        let code = code - if base < 0x2E { 0x1D } else { 0x20 };
        vec![code, code ^ 0x10]
    } else if base == 0x3F {
        vec![LOOK_PLAYER_MARKER]
    } else {
        vec![code]
    }
}

/// Element table: 256 slots, 0..=127 from the info bytes plus the 8-bit wall alias.
#[derive(Clone, Debug)]
pub struct ElementTable {
    entries: Vec<Option<ElementInfo>>,
}

impl ElementTable {
    /// Builds the table and returns it together with the surprise outcomes.
    pub fn from_info_bytes(info: &[u8]) -> Result<(Self, Vec<ElementCode>), PackError> {
        if info.len() < INFO_LEN {
            return Err(PackError::InfoTooShort { actual: info.len(), expected: INFO_LEN });
        }

        let mut entries: Vec<Option<ElementInfo>> = vec![None; ELEMENT_SLOTS];
        for code in 0..ELEMENT_CODES {
            let raw = info[code];
            let flags = info[ELEMENT_CODES + code];
            entries[code] = Some(ElementInfo {
                look: decode_look(raw),
                wall: raw & CODE_MASK == 0,
                shootable: flags & FLAG_SHOOTABLE != 0,
                blowable: flags & FLAG_BLOWABLE != 0,
                next: None,
                behavior: behavior_kind_for(code as ElementCode),
            });
        }

        let successors = &info[ELEMENT_CODES * 2..ELEMENT_CODES * 2 + SUCCESSOR_COUNT];
        for (offset, next) in successors.iter().enumerate() {
            let code = ANIM_FIRST as usize + offset;
            if let Some(entry) = entries[code].as_mut() {
                entry.next = if *next == 0 { None } else { Some(*next) };
            }
        }

        entries[EL_WALL as usize] = entries[EL_WALL_ALT as usize].clone();

        let surprises = info[INFO_LEN - SURPRISE_COUNT..INFO_LEN].to_vec();
        Ok((Self { entries }, surprises))
    }

    /// Raw lookup; guarded codes (bit 7) have no entry except the wall alias.
    #[inline]
    pub fn entry(&self, code: ElementCode) -> Option<&ElementInfo> {
        self.entries[code as usize].as_ref()
    }

    /// Lookup falling back to the masked code.
    #[inline]
    pub fn lookup(&self, code: ElementCode) -> Option<&ElementInfo> {
        self.entry(code).or_else(|| self.entry(code & CODE_MASK))
    }

    pub fn is_shootable(&self, code: ElementCode) -> bool {
        self.lookup(code).map_or(false, |info| info.shootable)
    }
}

/// One cave of the pack.
#[derive(Clone, Copy, Debug)]
pub struct CaveTemplate<'a> {
    pub index: usize,
    pub tiles: &'a [ElementCode],
    pub screws: u32,
    pub colors: [u8; PALETTE_BYTES],
}

impl<'a> CaveTemplate<'a> {
    #[inline]
    pub fn tile(&self, x: u32, y: u32) -> ElementCode {
        self.tiles[(y * CAVE_WIDTH + x) as usize]
    }
}

fn decode_bcd(byte: u8) -> u32 {
    ((byte >> 4) as u32) * 10 + (byte & 0x0F) as u32
}

fn encode_bcd(value: u32) -> u8 {
    let value = value.min(99);
    (((value / 10) << 4) | (value % 10)) as u8
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct BundleRoot {
    #[serde(default)]
    name: Option<String>,
    info: Vec<u8>,
    caves: Vec<u8>,
}

/// Element table, surprise pool and cave templates of one game.
#[derive(Clone, Debug)]
pub struct LevelPack {
    name: Option<String>,
    table: ElementTable,
    surprises: Vec<ElementCode>,
    info: Vec<u8>,
    caves: Vec<u8>,
    cave_count: usize,
}

impl LevelPack {
    pub fn from_bytes(info: &[u8], caves: &[u8]) -> Result<Self, PackError> {
        let (table, surprises) = ElementTable::from_info_bytes(info)?;
        if caves.is_empty() {
            return Err(PackError::CavesEmpty);
        }
        if caves.len() % CAVE_STRIDE != 0 {
            return Err(PackError::CavesMisaligned { len: caves.len(), stride: CAVE_STRIDE });
        }
        let cave_count = caves.len() / CAVE_STRIDE;
        tracing::info!(caves = cave_count, "level pack loaded");
        Ok(Self {
            name: None,
            table,
            surprises,
            info: info[..INFO_LEN].to_vec(),
            caves: caves.to_vec(),
            cave_count,
        })
    }

    pub fn from_bundle_json(json: &str) -> Result<Self, PackError> {
        let bundle: BundleRoot =
            serde_json::from_str(json).map_err(|e| PackError::Bundle(e.to_string()))?;
        let mut pack = Self::from_bytes(&bundle.info, &bundle.caves)?;
        pack.name = bundle.name;
        Ok(pack)
    }

    pub fn to_bundle_json(&self) -> Result<String, PackError> {
        let bundle = BundleRoot {
            name: self.name.clone(),
            info: self.info.clone(),
            caves: self.caves.clone(),
        };
        serde_json::to_string(&bundle).map_err(|e| PackError::Bundle(e.to_string()))
    }

    pub fn builder() -> PackBuilder {
        PackBuilder::new()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn table(&self) -> &ElementTable {
        &self.table
    }

    pub fn surprises(&self) -> &[ElementCode] {
        &self.surprises
    }

    pub fn cave_count(&self) -> usize {
        self.cave_count
    }

    /// Template of cave `index`, clamped to the last cave.
    pub fn cave(&self, index: usize) -> CaveTemplate<'_> {
        let index = index.min(self.cave_count - 1);
        let base = index * CAVE_STRIDE;
        let trailer = base + CAVE_TILES + 1;
        let mut colors = [0u8; PALETTE_BYTES];
        colors.copy_from_slice(&self.caves[trailer + 1..trailer + 1 + PALETTE_BYTES]);
        CaveTemplate {
            index,
            tiles: &self.caves[base..base + CAVE_TILES],
            screws: decode_bcd(self.caves[trailer]),
            colors,
        }
    }
}

/// Assembles pack bytes programmatically (editors, tests).
///
/// Every code starts with its own index as charset look, so only code 0 is a
/// wall, with no flags and no successor.
pub struct PackBuilder {
    info: Vec<u8>,
    caves: Vec<u8>,
}

impl Default for PackBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PackBuilder {
    pub fn new() -> Self {
        let mut info = vec![0u8; INFO_LEN];
        for (code, look) in info.iter_mut().take(ELEMENT_CODES).enumerate() {
            *look = code as u8;
        }
        Self { info, caves: Vec::new() }
    }

    pub fn look(mut self, code: ElementCode, raw: u8) -> Self {
        self.info[(code & CODE_MASK) as usize] = raw;
        self
    }

    pub fn shootable(mut self, codes: &[ElementCode]) -> Self {
        for code in codes {
            self.info[ELEMENT_CODES + (code & CODE_MASK) as usize] |= FLAG_SHOOTABLE;
        }
        self
    }

    pub fn blowable(mut self, codes: &[ElementCode]) -> Self {
        for code in codes {
            self.info[ELEMENT_CODES + (code & CODE_MASK) as usize] |= FLAG_BLOWABLE;
        }
        self
    }

    /// Ambient successor of an animation code (`0x61..=0x7A`); other codes are ignored.
    pub fn successor(mut self, code: ElementCode, next: ElementCode) -> Self {
        if (ANIM_FIRST..=ANIM_LAST).contains(&code) {
            self.info[ELEMENT_CODES * 2 + (code - ANIM_FIRST) as usize] = next;
        }
        self
    }

    pub fn surprises(mut self, codes: &[ElementCode]) -> Self {
        let start = INFO_LEN - SURPRISE_COUNT;
        for (slot, code) in self.info[start..].iter_mut().zip(codes.iter().cycle()) {
            *slot = *code;
        }
        self
    }

    /// Appends a cave; missing tiles are space, extra tiles are dropped.
    pub fn cave(self, tiles: &[ElementCode], screws: u32) -> Self {
        self.cave_with_colors(tiles, screws, [0; PALETTE_BYTES])
    }

    pub fn cave_with_colors(mut self, tiles: &[ElementCode], screws: u32, colors: [u8; PALETTE_BYTES]) -> Self {
        let mut block = vec![EL_SPACE; CAVE_STRIDE];
        for (dst, src) in block.iter_mut().zip(tiles.iter().take(CAVE_TILES)) {
            *dst = *src;
        }
        let trailer = CAVE_TILES + 1;
        block[trailer] = encode_bcd(screws);
        block[trailer + 1..trailer + 1 + PALETTE_BYTES].copy_from_slice(&colors);
        self.caves.extend_from_slice(&block);
        self
    }

    /// Flags, animation chains and surprise pool of the stock element set.
    pub fn standard_rules(self) -> Self {
        let creatures: Vec<ElementCode> = (EL_CREATURE_LH_UP..=EL_CREATURE_HS_RT).collect();
        let mut surprises = [EL_AMMO; SURPRISE_COUNT];
        for (slot, code) in surprises.iter_mut().zip(
            [EL_KEY, EL_SCREW, EL_AMMO, EL_BOX, EL_BOMB, EL_SPACE, EL_LIFE, EL_EYES].iter().cycle(),
        ) {
            *slot = *code;
        }
        surprises[SURPRISE_COUNT - 1] = 0;

        self.look(EL_PLAYER, 0x7E)
            .shootable(&[EL_PLAYER, EL_EYES, EL_BOMB, EL_QUESTION])
            .shootable(&creatures)
            .blowable(&creatures)
            .blowable(&[
                EL_PLAYER, EL_BOX, EL_KEY, EL_SCREW, EL_AMMO, EL_BOMB, EL_QUESTION, EL_EYES,
                EL_DOOR_H, EL_DOOR_V, EL_MAGNET_LT, EL_MAGNET_RT, EL_INERT_BOX,
                EL_CANNON_UP, EL_CANNON_DN, EL_CANNON_LT, EL_CANNON_RT,
                EL_CANNON_MOV_LT, EL_CANNON_MOV_RT, EL_LASER_UP, EL_LASER_DN,
                EL_BULLET_LT, EL_BULLET_RT, EL_BULLET_UP, EL_BULLET_DN,
            ])
            .chain(&[0x61, 0x62, 0x63, 0x64, 0x65], EL_SPACE)
            .chain(&[0x66, 0x67, 0x68], EL_SPACE)
            .chain(&[0x69, 0x6A, 0x6B, 0x6C, 0x6D], EL_PLAYER)
            .chain(&[0x6E, 0x6F, 0x70], EL_QUESTION_SURPRISE)
            .chain(&[0x76, 0x77, 0x78, 0x79], EL_ANIM_DISAPPEAR_A)
            .chain(&[EL_ANIM_DOOR_OPEN], EL_SPACE)
            .surprises(&surprises)
    }

    /// Links `codes` into a successor chain ending in `last`.
    fn chain(self, codes: &[ElementCode], last: ElementCode) -> Self {
        let nexts = codes.iter().skip(1).copied().chain(std::iter::once(last));
        codes.iter().zip(nexts).fold(self, |builder, (code, next)| builder.successor(*code, next))
    }

    pub fn info_bytes(&self) -> &[u8] {
        &self.info
    }

    pub fn cave_bytes(&self) -> &[u8] {
        &self.caves
    }

    pub fn build(self) -> Result<LevelPack, PackError> {
        LevelPack::from_bytes(&self.info, &self.caves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{
        EL_ANIM_DISAPPEAR_A, EL_ANIM_DISAPPEAR_B, EL_BOMB, EL_LIFE, EL_PLAYER, EL_SCREW,
    };

    #[test]
    fn short_info_table_is_rejected() {
        let err = LevelPack::from_bytes(&[0; 10], &[0; CAVE_STRIDE]).unwrap_err();
        assert_eq!(err, PackError::InfoTooShort { actual: 10, expected: INFO_LEN });
        assert!(err.to_string().contains("expected 314"));
    }

    #[test]
    fn misaligned_caves_are_rejected() {
        let info = PackBuilder::new().info_bytes().to_vec();
        let err = LevelPack::from_bytes(&info, &[0; CAVE_STRIDE + 3]).unwrap_err();
        assert!(matches!(err, PackError::CavesMisaligned { .. }));
        assert_eq!(LevelPack::from_bytes(&info, &[]).unwrap_err(), PackError::CavesEmpty);
    }

    #[test]
    fn table_flags_successors_and_wall_alias() {
        let pack = PackBuilder::new()
            .shootable(&[EL_BOMB])
            .blowable(&[EL_BOMB, EL_SCREW])
            .successor(EL_ANIM_DISAPPEAR_A, EL_ANIM_DISAPPEAR_B)
            .surprises(&[EL_LIFE])
            .cave(&[], 0)
            .build()
            .unwrap();
        let table = pack.table();

        let bomb = table.entry(EL_BOMB).unwrap();
        assert!(bomb.shootable && bomb.blowable);
        assert!(!table.entry(EL_SCREW).unwrap().shootable);
        assert_eq!(table.entry(EL_ANIM_DISAPPEAR_A).unwrap().next, Some(EL_ANIM_DISAPPEAR_B));
        assert_eq!(table.entry(EL_ANIM_DISAPPEAR_B).unwrap().next, None);

        assert!(table.entry(EL_WALL).unwrap().wall);
        assert!(table.entry(EL_PLAYER | 0x80).is_none());
        assert_eq!(table.lookup(EL_PLAYER | 0x80).unwrap().behavior, Some(BehaviorKind::Player));
        assert_eq!(pack.surprises(), &[EL_LIFE; SURPRISE_COUNT][..]);
    }

    #[test]
    fn look_decoding_marks_animations_and_player() {
        assert_eq!(decode_look(0x0A), vec![0x08, 0x18]);
        assert_eq!(decode_look(0x7E), vec![LOOK_PLAYER_MARKER]);
        assert_eq!(decode_look(0x02), vec![0x21]);
    }

    #[test]
    fn cave_trailer_decodes_screws_and_colors() {
        let pack = PackBuilder::new()
            .cave_with_colors(&[EL_PLAYER], 12, [1, 2, 3, 4, 5, 6])
            .build()
            .unwrap();
        let cave = pack.cave(0);
        assert_eq!(cave.screws, 12);
        assert_eq!(cave.colors, [1, 2, 3, 4, 5, 6]);
        assert_eq!(cave.tile(0, 0), EL_PLAYER);
        assert_eq!(cave.tile(1, 0), EL_SPACE);
    }

    #[test]
    fn bundle_json_loads_named_pack() {
        let builder = PackBuilder::new().cave(&[EL_PLAYER], 3);
        let json = serde_json::json!({
            "name": "demo",
            "info": builder.info_bytes(),
            "caves": builder.cave_bytes(),
        })
        .to_string();
        let pack = LevelPack::from_bundle_json(&json).unwrap();
        assert_eq!(pack.name(), Some("demo"));
        assert_eq!(pack.cave(0).screws, 3);

        let reloaded = LevelPack::from_bundle_json(&pack.to_bundle_json().unwrap()).unwrap();
        assert_eq!(reloaded.cave_count(), 1);

        let err = LevelPack::from_bundle_json("{").unwrap_err();
        assert!(matches!(err, PackError::Bundle(_)));
    }
}
