use crate::domain::content::LOOK_PLAYER_MARKER;
use crate::domain::state::TILE_PX;

use super::EngineCore;

/// Visual of a code without a table entry.
pub(super) const VISUAL_BLANK: u8 = 0xFF;
/// Forces the next diff to report the tile.
pub(super) const VISUAL_DIRTY: u8 = 0xFE;

pub(super) fn visual_of(engine: &EngineCore, tile: usize) -> Option<u8> {
    let code = *engine.grid.tiles.get(tile)?;
    let info = engine.pack.table().lookup(code)?;
    let frame = (engine.state.counter >> 1) as usize % info.look.len().max(1);
    let look = *info.look.get(frame)?;
    Some(if info.wall {
        (look & 0x80) | engine.wall_glyph
    } else if look == LOOK_PLAYER_MARKER {
        engine.state.player_look
    } else {
        look
    })
}

pub(super) fn collect_dirty_tiles(engine: &mut EngineCore) -> usize {
    engine.render.dirty_list.clear();
    for tile in 0..engine.grid.size() {
        let visual = visual_of(engine, tile).unwrap_or(VISUAL_BLANK);
        engine.render.visuals[tile] = visual;
        if engine.render.drawn[tile] != visual {
            engine.render.drawn[tile] = visual;
            engine.render.dirty_list.push(tile as u32);
        }
    }
    engine.render.dirty_list.len()
}

pub(super) fn mark_all_dirty(engine: &mut EngineCore) {
    engine.render.drawn.fill(VISUAL_DIRTY);
}

/// Invalidates the tile rows covering pixel rows `[top, top + height)`.
pub(super) fn mark_rows_dirty(engine: &mut EngineCore, top_px: i32, height_px: i32) {
    if height_px <= 0 {
        return;
    }
    let rows = engine.grid.height() as i32;
    let first = (top_px / TILE_PX).clamp(0, rows);
    let last = ((top_px + height_px + TILE_PX - 1) / TILE_PX).clamp(0, rows);
    let width = engine.grid.width() as usize;
    for y in first..last {
        let start = y as usize * width;
        engine.render.drawn[start..start + width].fill(VISUAL_DIRTY);
    }
}
