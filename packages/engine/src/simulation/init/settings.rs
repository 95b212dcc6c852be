use crate::core::XorShift32;
use crate::domain::config::EngineSettings;

use super::perf_stats::PerfStats;
use super::EngineCore;

/// Reseeds the shared generator; takes effect on the next draw.
pub(super) fn set_seed(engine: &mut EngineCore, seed: u32) {
    engine.settings.seed = seed;
    engine.rng = Box::new(XorShift32::new(seed));
}

pub(super) fn apply_settings(engine: &mut EngineCore, settings: EngineSettings) {
    let settings = settings.sanitized();
    if settings.seed != engine.settings.seed {
        engine.rng = Box::new(XorShift32::new(settings.seed));
    }
    engine.settings = settings;
}

pub(super) fn enable_perf_metrics(engine: &mut EngineCore, enabled: bool) {
    engine.perf_enabled = enabled;
}

pub(super) fn get_perf_stats(engine: &EngineCore) -> PerfStats {
    engine.perf_stats.clone()
}
