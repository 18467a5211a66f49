use std::collections::VecDeque;

/// Work that must wait until the freshly rebuilt rows have been laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    FocusRow(usize),
}

/// Single-threaded queue drained by the event loop after each render pass.
///
/// Nothing queued here runs during the handler that queued it.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: VecDeque<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task for the next idle slot. A newer focus request replaces
    /// any older one still waiting.
    pub fn defer(&mut self, task: Task) {
        match task {
            Task::FocusRow(_) => self.queue.retain(|t| !matches!(t, Task::FocusRow(_))),
        }
        self.queue.push_back(task);
    }

    /// Take everything queued so far; tasks queued while these run wait for
    /// the next pass.
    pub fn take_pending(&mut self) -> Vec<Task> {
        self.queue.drain(..).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}
