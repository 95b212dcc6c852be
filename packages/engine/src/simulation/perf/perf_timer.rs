//! Millisecond stopwatch for perf stats; `Date.now()` in the browser.

#[cfg(target_arch = "wasm32")]
type Origin = f64;
#[cfg(not(target_arch = "wasm32"))]
type Origin = std::time::Instant;

pub(crate) struct PerfTimer {
    origin: Origin,
}

impl PerfTimer {
    /// Starts a timer only while perf metrics are enabled.
    pub(crate) fn start_if(enabled: bool) -> Option<Self> {
        enabled.then(|| PerfTimer { origin: now() })
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        since(&self.origin)
    }
}

#[cfg(target_arch = "wasm32")]
fn now() -> Origin {
    js_sys::Date::now()
}

#[cfg(target_arch = "wasm32")]
fn since(origin: &Origin) -> f64 {
    js_sys::Date::now() - origin
}

#[cfg(not(target_arch = "wasm32"))]
fn now() -> Origin {
    std::time::Instant::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn since(origin: &Origin) -> f64 {
    origin.elapsed().as_secs_f64() * 1000.0
}
