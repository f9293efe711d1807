//! Reactive state container.
//!
//! A [`Store`] wraps a plain record. Every write goes through [`Store::set`],
//! which applies the write and then notifies a [`Listener`] synchronously,
//! before `set` returns. The listener receives the store itself so that it can
//! read the already-updated record and issue nested writes; those cascade
//! through the same listener depth-first.
//!
//! There is no per-field subscription: the listener sees every write and
//! matches on it.

use std::fmt;
use std::ops::Deref;

/// A record whose mutations are expressed as explicit write values.
pub trait Record {
    /// Name of a field, used for logging and matching.
    type Field: Copy + Eq + fmt::Debug;
    /// One field assignment (field + new value).
    type Write: fmt::Debug;

    fn apply(&mut self, write: &Self::Write);
    fn field(write: &Self::Write) -> Self::Field;
}

/// Receives every write made through a [`Store`].
pub trait Listener<R: Record> {
    fn on_write(&mut self, store: &mut Store<R>, write: &R::Write);
}

impl<R, F> Listener<R> for F
where
    R: Record,
    F: FnMut(&mut Store<R>, &R::Write),
{
    fn on_write(&mut self, store: &mut Store<R>, write: &R::Write) {
        self(store, write)
    }
}

/// Listener that ignores every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl<R: Record> Listener<R> for Silent {
    fn on_write(&mut self, _store: &mut Store<R>, _write: &R::Write) {}
}

#[derive(Debug, Clone, Default)]
pub struct Store<R> {
    record: R,
    depth: usize,
    writes: u64,
}

impl<R: Record> Store<R> {
    pub fn new(record: R) -> Self {
        Self {
            record,
            depth: 0,
            writes: 0,
        }
    }

    /// Apply `write`, then notify `listener` before returning.
    pub fn set<L: Listener<R>>(&mut self, listener: &mut L, write: R::Write) {
        self.record.apply(&write);
        self.writes = self.writes.wrapping_add(1);
        log::trace!(
            "store write {:?} (depth {}): {:?}",
            R::field(&write),
            self.depth,
            write
        );
        self.depth += 1;
        listener.on_write(self, &write);
        self.depth -= 1;
    }

    /// Current notification nesting; zero outside of any listener call.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total writes applied since construction.
    #[inline]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    #[inline]
    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn into_inner(self) -> R {
        self.record
    }
}

impl<R> Deref for Store<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Counter {
        count: i32,
        label: String,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum CounterField {
        Count,
        Label,
    }

    #[derive(Debug, Clone)]
    enum CounterWrite {
        Count(i32),
        Label(String),
    }

    impl Record for Counter {
        type Field = CounterField;
        type Write = CounterWrite;

        fn apply(&mut self, write: &CounterWrite) {
            match write {
                CounterWrite::Count(c) => self.count = *c,
                CounterWrite::Label(l) => self.label = l.clone(),
            }
        }

        fn field(write: &CounterWrite) -> CounterField {
            match write {
                CounterWrite::Count(_) => CounterField::Count,
                CounterWrite::Label(_) => CounterField::Label,
            }
        }
    }

    #[test]
    fn listener_sees_updated_record() {
        let mut store = Store::new(Counter::default());
        let mut seen = Vec::new();
        let mut listener = |s: &mut Store<Counter>, w: &CounterWrite| {
            seen.push((Counter::field(w), s.count, s.depth()));
        };
        store.set(&mut listener, CounterWrite::Count(4));
        assert_eq!(seen, vec![(CounterField::Count, 4, 1)]);
        assert_eq!(store.count, 4);
        assert_eq!(store.depth(), 0);
        assert_eq!(store.writes(), 1);
    }

    struct Cascade {
        log: Vec<String>,
    }

    impl Listener<Counter> for Cascade {
        fn on_write(&mut self, store: &mut Store<Counter>, write: &CounterWrite) {
            self.log.push(format!("{:?}@{}", Counter::field(write), store.depth()));
            if let CounterWrite::Count(c) = write {
                store.set(self, CounterWrite::Label(format!("{c} / 10")));
            }
        }
    }

    #[test]
    fn nested_writes_cascade_synchronously() {
        let mut store = Store::new(Counter::default());
        let mut cascade = Cascade { log: Vec::new() };
        store.set(&mut cascade, CounterWrite::Count(3));
        assert_eq!(store.label, "3 / 10");
        assert_eq!(cascade.log, vec!["Count@1", "Label@2"]);
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn silent_listener_still_applies() {
        let mut store = Store::new(Counter::default());
        store.set(&mut Silent, CounterWrite::Label("x".into()));
        assert_eq!(store.record().label, "x");
        assert_eq!(store.into_inner().label, "x");
    }
}
