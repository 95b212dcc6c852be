use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) tick_ms: f64,
    pub(super) pass_ms: f64,
    pub(super) passes: u32,
    pub(super) behavior_calls: u32,
    pub(super) successor_writes: u32,
    pub(super) guard_clears: u32,
    pub(super) cues: u32,
    pub(super) columns_streamed: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
    #[wasm_bindgen(getter)]
    pub fn pass_ms(&self) -> f64 { self.pass_ms }
    #[wasm_bindgen(getter)]
    pub fn passes(&self) -> u32 { self.passes }
    #[wasm_bindgen(getter)]
    pub fn behavior_calls(&self) -> u32 { self.behavior_calls }
    #[wasm_bindgen(getter)]
    pub fn successor_writes(&self) -> u32 { self.successor_writes }
    #[wasm_bindgen(getter)]
    pub fn guard_clears(&self) -> u32 { self.guard_clears }
    #[wasm_bindgen(getter)]
    pub fn cues(&self) -> u32 { self.cues }
    #[wasm_bindgen(getter)]
    pub fn columns_streamed(&self) -> u32 { self.columns_streamed }
}
