//! Deferred work on a single-threaded, cooperative queue.
//!
//! The render loop feeds wall-clock timestamps into
//! [`Scheduler::pop_due`]; tasks come out in due-time order, ties broken by
//! scheduling order. Nothing runs concurrently: a task runs to completion
//! before the next is popped, and tasks carry no state snapshot, so each
//! one reads the live game state when it runs.

/// Work the engine can defer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// Finish the pending pack opening.
    RevealPack,
    /// Pay out any milestones reached.
    CheckMilestones,
    /// Credit passive income and schedule the next tick.
    PassiveTick,
}

#[derive(Clone, Debug)]
struct Scheduled {
    due_ms: f64,
    seq: u64,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: Vec<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to run `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, task: Task) {
        let due_ms = now_ms + delay_ms;
        log::debug!("scheduling {:?} at {}", task, due_ms);
        self.queue.push(Scheduled {
            due_ms,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
    }

    /// Remove and return the earliest task due at `now_ms`, with its due time.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(Task, f64)> {
        let idx = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;
        let scheduled = self.queue.remove(idx);
        Some((scheduled.task, scheduled.due_ms))
    }

    /// Drop every queued instance of `task`.
    pub fn cancel(&mut self, task: Task) {
        self.queue.retain(|s| s.task != task);
    }

    #[cfg(test)]
    pub fn is_scheduled(&self, task: Task) -> bool {
        self.queue.iter().any(|s| s.task == task)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
