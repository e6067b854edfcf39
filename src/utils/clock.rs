use crate::utils::time::now_local;
use chrono::{NaiveDateTime, TimeDelta};
use std::cell::Cell;

/// Source of wall-clock time for the session tracker, so tests can drive it.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        now_local()
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Cell<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
