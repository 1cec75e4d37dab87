//! Abstract capability the host interpreter runtime must provide.
//!
//! The attribution engine never owns interpreter state. It borrows frame
//! and thread handles for the duration of one walk, under a scoped
//! execution-lock guard, and releases everything before the sample call
//! returns. A CPython binding implements these traits over the C API; the
//! integration tests implement them over scripted stacks.

use crate::domain::ThreadId;

/// Borrowed handle to one interpreter frame.
///
/// Handles are valid only while the execution-lock guard that produced
/// them is alive, and must not be retained past the walk.
pub trait FrameRef: Sized {
    /// Source file of the frame's code unit.
    ///
    /// `None` means the identifier exists but could not be decoded to a
    /// string; `Some("")` is a legitimately nameless code unit. The walk
    /// skips both without consulting the filter.
    fn source_file(&self) -> Option<String>;

    /// 1-based line currently executing in this frame.
    fn line_number(&self) -> u32;

    /// Bytecode offset within the frame; 0 on runtimes that cannot
    /// expose one.
    fn instruction_offset(&self) -> u32;

    /// Consume this handle and return the caller's frame, if any.
    ///
    /// Consuming keeps at most one frame handle live per walk, so all
    /// runtime-side bookkeeping is released as the walk moves outward.
    fn caller(self) -> Option<Self>;
}

/// Live interpreter thread together with its current frame, if it has one.
#[derive(Debug)]
pub struct ThreadSnapshot<F> {
    pub id: ThreadId,
    pub frame: Option<F>,
}

/// Host interpreter runtime, as seen by the attribution engine.
pub trait InterpreterRuntime {
    /// Scoped guard for the interpreter-wide execution lock.
    ///
    /// Frame objects are mutated concurrently by the running program;
    /// inspecting them is only safe while a guard is alive. Dropping the
    /// guard releases the lock, which covers every exit path of the walk.
    type Guard<'rt>
    where
        Self: 'rt;

    /// Borrowed frame handle, valid while inspecting under a guard.
    type Frame<'rt>: FrameRef
    where
        Self: 'rt;

    /// Whether the interpreter is initialized and running. When false no
    /// frames exist and the resolver answers immediately.
    fn is_initialized(&self) -> bool;

    /// Block until the execution lock is held.
    fn lock_execution(&self) -> Self::Guard<'_>;

    /// Current frame of the calling thread, if the runtime recognizes the
    /// calling thread as running interpreted code.
    fn current_thread_frame<'rt>(&'rt self, guard: &Self::Guard<'rt>)
        -> Option<Self::Frame<'rt>>;

    /// Snapshot of all live interpreter threads.
    fn threads<'rt>(&'rt self, guard: &Self::Guard<'rt>) -> Vec<ThreadSnapshot<Self::Frame<'rt>>>;
}
