/// Handle to a pending frame callback or timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Timer<T> {
    id: u64,
    due_ms: f64,
    task: T,
}

/// Virtual-time queue of frame callbacks and fixed-delay timers.
///
/// Time only moves when the host calls [`Scheduler::advance`]. Each advance yields the timers
/// that came due (ordered by due time, then scheduling order) followed by every frame that was
/// pending when the advance began; frames requested while those run wait for the next advance.
#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: f64,
    next_id: u64,
    frames: Vec<(u64, T)>,
    timers: Vec<Timer<T>>,
    frames_requested: u64,
    timers_scheduled: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Empty queue at time zero.
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 0,
            frames: Vec::new(),
            timers: Vec::new(),
            frames_requested: 0,
            timers_scheduled: 0,
        }
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn alloc(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Run `task` on the next frame.
    pub fn request_frame(&mut self, task: T) -> TaskHandle {
        let id = self.alloc();
        self.frames.push((id, task));
        self.frames_requested += 1;
        TaskHandle(id)
    }

    /// Run `task` once `delay_ms` of virtual time has elapsed.
    pub fn set_timeout(&mut self, delay_ms: f64, task: T) -> TaskHandle {
        let id = self.alloc();
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms + delay_ms.max(0.0),
            task,
        });
        self.timers_scheduled += 1;
        TaskHandle(id)
    }

    /// Drop a pending frame or timer. Returns `false` when it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        if let Some(i) = self.frames.iter().position(|(id, _)| *id == handle.0) {
            self.frames.remove(i);
            return true;
        }
        if let Some(i) = self.timers.iter().position(|t| t.id == handle.0) {
            self.timers.remove(i);
            return true;
        }
        false
    }

    /// Move virtual time to `now_ms` (never backwards) and take everything that is due.
    pub fn advance(&mut self, now_ms: f64) -> Vec<T> {
        if now_ms.is_finite() && now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
        let now = self.now_ms;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.timers).into_iter().partition(|t| t.due_ms <= now);
        self.timers = pending;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)));

        let mut out: Vec<T> = due.into_iter().map(|t| t.task).collect();
        out.extend(std::mem::take(&mut self.frames).into_iter().map(|(_, task)| task));
        out
    }

    /// Frames requested since construction.
    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    /// Timers scheduled since construction.
    pub fn timers_scheduled(&self) -> u64 {
        self.timers_scheduled
    }

    /// Frames waiting for the next advance.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Timers not yet due.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Return `true` when nothing is queued.
    pub fn is_idle(&self) -> bool {
        self.frames.is_empty() && self.timers.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
