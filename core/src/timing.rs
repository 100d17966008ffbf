//! Wall-clock instrumentation for pipeline stages.

use std::time::Instant;

/// Run `f`, log how long it took under `label`, and hand back its result.
pub fn timed<T, F>(label: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    log::info!("{label}: {:.4} seconds", start.elapsed().as_secs_f64());
    result
}
