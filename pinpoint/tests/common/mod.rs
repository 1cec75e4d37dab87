//! Scripted interpreter runtime used by the integration tests.
//!
//! Stands in for a real interpreter binding: stacks are fixed frame lists,
//! innermost first, and the execution lock is an ordinary mutex.

#![allow(dead_code)] // not every test binary uses every helper

use std::sync::{Mutex, MutexGuard, PoisonError};

use pinpoint::domain::ThreadId;
use pinpoint::runtime::{FrameRef, InterpreterRuntime, ThreadSnapshot};

/// One frame in a scripted stack.
#[derive(Clone)]
pub struct FrameSpec {
    file: Option<String>,
    line: u32,
    lasti: u32,
}

impl FrameSpec {
    pub fn at(file: &str, line: u32, lasti: u32) -> Self {
        Self { file: Some(file.to_owned()), line, lasti }
    }

    /// A frame whose source name the runtime cannot decode.
    pub fn undecodable() -> Self {
        Self { file: None, line: 1, lasti: 0 }
    }
}

pub struct ScriptedThread {
    pub id: u64,
    /// Innermost frame first.
    pub stack: Vec<FrameSpec>,
}

pub struct ScriptedRuntime {
    initialized: bool,
    /// Stack of the calling thread; `None` simulates a native thread the
    /// interpreter has no state for.
    current: Option<Vec<FrameSpec>>,
    threads: Vec<ScriptedThread>,
    lock: Mutex<()>,
}

impl ScriptedRuntime {
    pub fn uninitialized() -> Self {
        Self { initialized: false, current: None, threads: Vec::new(), lock: Mutex::new(()) }
    }

    /// Runtime whose calling thread runs the given stack.
    pub fn with_current_stack(stack: Vec<FrameSpec>) -> Self {
        Self { initialized: true, current: Some(stack), threads: Vec::new(), lock: Mutex::new(()) }
    }

    /// Runtime sampled from a native thread: no current frame, only the
    /// given interpreter threads to fall back to.
    pub fn with_native_caller(threads: Vec<ScriptedThread>) -> Self {
        Self { initialized: true, current: None, threads, lock: Mutex::new(()) }
    }
}

pub struct ScriptedFrame<'rt> {
    stack: &'rt [FrameSpec],
    depth: usize,
}

impl<'rt> ScriptedFrame<'rt> {
    fn innermost(stack: &'rt [FrameSpec]) -> Option<Self> {
        (!stack.is_empty()).then_some(Self { stack, depth: 0 })
    }
}

impl FrameRef for ScriptedFrame<'_> {
    fn source_file(&self) -> Option<String> {
        self.stack[self.depth].file.clone()
    }

    fn line_number(&self) -> u32 {
        self.stack[self.depth].line
    }

    fn instruction_offset(&self) -> u32 {
        self.stack[self.depth].lasti
    }

    fn caller(self) -> Option<Self> {
        let next = self.depth + 1;
        (next < self.stack.len()).then_some(Self { stack: self.stack, depth: next })
    }
}

impl InterpreterRuntime for ScriptedRuntime {
    type Guard<'rt>
        = MutexGuard<'rt, ()>
    where
        Self: 'rt;

    type Frame<'rt>
        = ScriptedFrame<'rt>
    where
        Self: 'rt;

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn lock_execution(&self) -> Self::Guard<'_> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_thread_frame<'rt>(
        &'rt self,
        _guard: &Self::Guard<'rt>,
    ) -> Option<Self::Frame<'rt>> {
        self.current.as_deref().and_then(ScriptedFrame::innermost)
    }

    fn threads<'rt>(&'rt self, _guard: &Self::Guard<'rt>) -> Vec<ThreadSnapshot<Self::Frame<'rt>>> {
        self.threads
            .iter()
            .map(|thread| ThreadSnapshot {
                id: ThreadId(thread.id),
                frame: ScriptedFrame::innermost(&thread.stack),
            })
            .collect()
    }
}

static SERIAL: Mutex<()> = Mutex::new(());

/// Serialize tests that touch the process-wide filter singleton.
pub fn serialize() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}
