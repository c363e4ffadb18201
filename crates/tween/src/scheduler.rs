//! Keyed task list polled once per tick.
//!
//! A [`Scheduler`] owns every tween that writes to a family of properties (for
//! example "source position of each rig channel"). Each key has a generation
//! counter: starting or cancelling a tween for a key bumps it, and any task
//! still carrying an older generation exits on its next poll without writing.
//! Two tweens therefore never race on the same sink.

use std::collections::HashMap;
use std::hash::Hash;

use crate::{Lerp, Tween};

/// Identifies one scheduled tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle<K> {
    key: K,
    generation: u64,
}

impl<K: Copy> TaskHandle<K> {
    pub fn key(&self) -> K {
        self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Task<K, V> {
    key: K,
    generation: u64,
    tween: Tween<V>,
}

/// Cooperative scheduler for tweens keyed by the property they drive.
#[derive(Debug, Clone)]
pub struct Scheduler<K, V> {
    tasks: Vec<Task<K, V>>,
    generations: HashMap<K, u64>,
}

impl<K, V> Scheduler<K, V>
where
    K: Copy + Eq + Hash,
    V: Lerp,
{
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            generations: HashMap::new(),
        }
    }

    /// Schedules `tween` for `key`, superseding whatever was running for it.
    ///
    /// The tween is not stepped here; its first step happens on the next
    /// [`advance`](Self::advance).
    pub fn start(&mut self, key: K, tween: Tween<V>) -> TaskHandle<K> {
        let generation = self.bump(key);
        self.tasks.push(Task {
            key,
            generation,
            tween,
        });
        TaskHandle { key, generation }
    }

    /// Retires the running tween for `key`, if any.
    ///
    /// Returns `true` if a live tween was cancelled.
    pub fn cancel(&mut self, key: K) -> bool {
        let was_running = self.is_running(key);
        self.bump(key);
        was_running
    }

    /// Retires every running tween.
    pub fn cancel_all(&mut self) {
        let keys: Vec<K> = self.tasks.iter().map(|task| task.key).collect();
        for key in keys {
            self.bump(key);
        }
        self.tasks.clear();
    }

    /// Returns `true` if a current-generation tween exists for `key`.
    pub fn is_running(&self, key: K) -> bool {
        self.tasks
            .iter()
            .any(|task| task.key == key && self.is_current(task))
    }

    /// Returns `true` if the tween behind `handle` is still scheduled and current.
    pub fn is_live(&self, handle: TaskHandle<K>) -> bool {
        self.generations.get(&handle.key) == Some(&handle.generation)
            && self
                .tasks
                .iter()
                .any(|task| task.key == handle.key && task.generation == handle.generation)
    }

    /// Polls every task once.
    ///
    /// Current tasks advance by `dt` and deliver their value to `sink`.
    /// Finished tasks are removed after delivering the end value; stale tasks
    /// are removed without delivering anything.
    pub fn advance<F>(&mut self, dt: f32, mut sink: F)
    where
        F: FnMut(K, V),
    {
        let generations = &self.generations;
        self.tasks.retain_mut(|task| {
            if generations.get(&task.key) != Some(&task.generation) {
                return false; // Superseded or cancelled
            }

            let step = task.tween.step(dt);
            let finished = step.is_finished();
            sink(task.key, step.value());
            !finished
        });
    }

    /// Number of scheduled tasks, including stale ones not yet polled.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of current-generation tasks.
    pub fn live_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| self.is_current(task))
            .count()
    }

    /// Drops all tasks. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.cancel_all();
    }

    fn is_current(&self, task: &Task<K, V>) -> bool {
        self.generations.get(&task.key) == Some(&task.generation)
    }

    fn bump(&mut self, key: K) -> u64 {
        let generation = self.generations.entry(key).or_insert(0);
        *generation += 1;
        *generation
    }
}

impl<K, V> Default for Scheduler<K, V>
where
    K: Copy + Eq + Hash,
    V: Lerp,
{
    fn default() -> Self {
        Self::new()
    }
}
