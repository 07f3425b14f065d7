//! Weak index of runtime objects owned by an interpreter.
//!
//! Closures capture environments, environments hold instances, and instance
//! fields hold closures, so reference cycles are routine. The registry keeps
//! a weak handle to every environment, instance and vector the interpreter
//! allocates.
//!
//! While a program runs, [`ObjectRegistry::collect`] empties tracked objects
//! a [`Marker`] did not reach from the interpreter's roots, which breaks the
//! cycles among them and lets `Rc` free them. [`ObjectRegistry::teardown`]
//! does the same for everything still alive when the interpreter goes away.

mod marker;

pub use marker::Marker;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::environment::Scope;
use crate::object::Instance;
use crate::shared::Shared;
use crate::{Environment, Value};

/// Prune dead entries after this many insertions.
const SWEEP_INTERVAL: usize = 4096;

/// Fewest insertions between two collections.
const MIN_COLLECTION_INTERVAL: usize = 4096;

pub struct ObjectRegistry {
    envs: Vec<Weak<RefCell<Scope>>>,
    instances: Vec<Weak<Instance>>,
    vecs: Vec<Weak<RefCell<Vec<Value>>>>,
    since_sweep: usize,
    since_collect: usize,
    /// Insertions that make the next collection due; grows with survivors.
    collect_interval: usize,
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        ObjectRegistry {
            envs: Vec::new(),
            instances: Vec::new(),
            vecs: Vec::new(),
            since_sweep: 0,
            since_collect: 0,
            collect_interval: MIN_COLLECTION_INTERVAL,
        }
    }
}

/// Live object counts, as reported by [`ObjectRegistry::live`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiveObjects {
    pub envs: usize,
    pub instances: usize,
    pub vecs: usize,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track_env(&mut self, env: &Environment) {
        self.envs.push(env.downgrade());
        self.bump();
    }

    pub fn track_instance(&mut self, instance: &Rc<Instance>) {
        self.instances.push(Rc::downgrade(instance));
        self.bump();
    }

    pub fn track_vec(&mut self, items: &Shared<Vec<Value>>) {
        self.vecs.push(items.downgrade());
        self.bump();
    }

    fn bump(&mut self) {
        self.since_collect += 1;
        self.since_sweep += 1;
        if self.since_sweep >= SWEEP_INTERVAL {
            self.sweep();
        }
    }

    /// Drop entries whose objects are already gone.
    pub fn sweep(&mut self) {
        let before = self.envs.len() + self.instances.len() + self.vecs.len();
        self.envs.retain(|w| w.strong_count() > 0);
        self.instances.retain(|w| w.strong_count() > 0);
        self.vecs.retain(|w| w.strong_count() > 0);
        self.since_sweep = 0;
        let after = self.envs.len() + self.instances.len() + self.vecs.len();
        tracing::trace!(before, after, "registry sweep");
    }

    /// Enough allocations since the last collection to run another.
    pub fn collection_due(&self) -> bool {
        self.since_collect >= self.collect_interval
    }

    /// Anything allocated since the last collection?
    pub fn allocated_since_collect(&self) -> bool {
        self.since_collect > 0
    }

    /// Empty every live tracked object that `marker` did not reach.
    ///
    /// `marker` must already have marked from every root; an object reached
    /// only through something it was not told about gets emptied. Returns
    /// the number of objects emptied.
    pub fn collect(&mut self, marker: &Marker) -> usize {
        let mut severed = 0;
        for weak in &self.envs {
            if marker.is_reached(weak.as_ptr().cast()) {
                continue;
            }
            if let Some(scope) = weak.upgrade() {
                let contents = scope.borrow_mut().sever();
                drop(contents);
                severed += 1;
            }
        }
        for weak in &self.instances {
            if marker.is_reached(weak.as_ptr().cast()) {
                continue;
            }
            if let Some(instance) = weak.upgrade() {
                instance.clear_fields();
                severed += 1;
            }
        }
        for weak in &self.vecs {
            if marker.is_reached(weak.as_ptr().cast()) {
                continue;
            }
            if let Some(items) = weak.upgrade() {
                let contents = std::mem::take(&mut *items.borrow_mut());
                drop(contents);
                severed += 1;
            }
        }

        self.sweep();
        let survivors = self.envs.len() + self.instances.len() + self.vecs.len();
        self.since_collect = 0;
        self.collect_interval = (survivors * 2).max(MIN_COLLECTION_INTERVAL);
        tracing::debug!(
            reached = marker.len(),
            severed,
            survivors,
            next = self.collect_interval,
            "registry collect"
        );
        severed
    }

    /// Count tracked objects that are still alive.
    pub fn live(&self) -> LiveObjects {
        LiveObjects {
            envs: self.envs.iter().filter(|w| w.strong_count() > 0).count(),
            instances: self.instances.iter().filter(|w| w.strong_count() > 0).count(),
            vecs: self.vecs.iter().filter(|w| w.strong_count() > 0).count(),
        }
    }

    /// Empty every live environment, instance and vector.
    ///
    /// Contents are dropped only after the owning borrow is released, since
    /// dropping them can reach other tracked objects.
    pub fn teardown(&mut self) {
        let live = self.live();
        tracing::debug!(
            envs = live.envs,
            instances = live.instances,
            vecs = live.vecs,
            "registry teardown"
        );
        for weak in self.envs.drain(..) {
            if let Some(scope) = weak.upgrade() {
                let severed = scope.borrow_mut().sever();
                drop(severed);
            }
        }
        for weak in self.instances.drain(..) {
            if let Some(instance) = weak.upgrade() {
                instance.clear_fields();
            }
        }
        for weak in self.vecs.drain(..) {
            if let Some(items) = weak.upgrade() {
                let contents = std::mem::take(&mut *items.borrow_mut());
                drop(contents);
            }
        }
        self.since_sweep = 0;
        self.since_collect = 0;
    }
}

#[cfg(test)]
mod tests;
