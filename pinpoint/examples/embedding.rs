//! Minimal embedding walkthrough
//!
//! Wires a toy interpreter runtime through registration and resolves one
//! sample, the same way a real binding and sampling trigger would.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example embedding
//!
//! # With the skipped-frame decisions logged:
//! RUST_LOG=debug cargo run --example embedding
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use pinpoint::domain::ThreadId;
use pinpoint::runtime::{FrameRef, InterpreterRuntime, ThreadSnapshot};
use pinpoint::{print_files_to_profile, register_files_to_profile};

/// A "running interpreter" with one thread and a fixed stack, innermost
/// frame first: `(file, line, instruction offset)`.
struct ToyRuntime {
    stack: Vec<(&'static str, u32, u32)>,
    lock: Mutex<()>,
}

struct ToyFrame<'rt> {
    stack: &'rt [(&'static str, u32, u32)],
    depth: usize,
}

impl FrameRef for ToyFrame<'_> {
    fn source_file(&self) -> Option<String> {
        Some(self.stack[self.depth].0.to_owned())
    }

    fn line_number(&self) -> u32 {
        self.stack[self.depth].1
    }

    fn instruction_offset(&self) -> u32 {
        self.stack[self.depth].2
    }

    fn caller(self) -> Option<Self> {
        let next = self.depth + 1;
        (next < self.stack.len()).then_some(Self { stack: self.stack, depth: next })
    }
}

impl InterpreterRuntime for ToyRuntime {
    type Guard<'rt>
        = MutexGuard<'rt, ()>
    where
        Self: 'rt;

    type Frame<'rt>
        = ToyFrame<'rt>
    where
        Self: 'rt;

    fn is_initialized(&self) -> bool {
        true
    }

    fn lock_execution(&self) -> Self::Guard<'_> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_thread_frame<'rt>(
        &'rt self,
        _guard: &Self::Guard<'rt>,
    ) -> Option<Self::Frame<'rt>> {
        (!self.stack.is_empty()).then_some(ToyFrame { stack: &self.stack, depth: 0 })
    }

    fn threads<'rt>(&'rt self, _guard: &Self::Guard<'rt>) -> Vec<ThreadSnapshot<Self::Frame<'rt>>> {
        vec![ThreadSnapshot {
            id: ThreadId(1),
            frame: (!self.stack.is_empty()).then_some(ToyFrame { stack: &self.stack, depth: 0 }),
        }]
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Sample taken mid-import: two interpreter frames above the user code.
    let runtime = ToyRuntime {
        stack: vec![
            ("<frozen importlib._bootstrap>", 241, 0),
            ("/usr/lib/python3.11/threading.py", 1016, 24),
            ("/home/u/myapp/worker.py", 42, 6),
        ],
        lock: Mutex::new(()),
    };

    // What the embedder does once at start-up.
    register_files_to_profile(runtime, vec!["myapp/".to_owned()], "/home/u/myapp", false)?;
    print_files_to_profile();

    // What the sampling trigger does on every tick.
    let resolver = pinpoint_common::installed_resolver().expect("resolver was just published");
    let location = resolver.resolve_location();
    println!(
        "sample charged to {}:{} (instruction offset {})",
        location.file, location.line, location.instruction_offset
    );

    Ok(())
}
