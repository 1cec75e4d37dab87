//! Fallback thread selection for samples taken on native threads.
//!
//! Extension packages may spawn native worker threads the interpreter has
//! no frame for. Their samples are attributed to whatever the main thread
//! is doing, as it most likely requested the work.

use log::debug;

use crate::runtime::InterpreterRuntime;

/// Current frame of the thread most likely to be the interpreter's main
/// thread, or `None` when no interpreter thread is alive.
///
/// The main thread is recognized as the one with the numerically smallest
/// identifier. That is a heuristic, not a contract; it lives here so a
/// stronger identification can replace it without touching the walk.
pub fn main_thread_frame<'rt, R>(
    runtime: &'rt R,
    guard: &R::Guard<'rt>,
) -> Option<R::Frame<'rt>>
where
    R: InterpreterRuntime,
{
    let main = runtime.threads(guard).into_iter().min_by_key(|thread| thread.id)?;
    debug!("attributing native-thread sample to {}", main.id);
    main.frame
}
