//! Settle-then-apply values
//!
//! Typing into the text field changes the text on every keystroke; the
//! layout follows only once the value has held still for a short delay.

/// A value that commits after it stops changing for `delay` seconds
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    settled: T,
    pending: Option<(T, f32)>,
    delay: f32,
}

impl<T: Clone + PartialEq> Debounced<T> {
    /// Start settled on `value`
    pub fn new(value: T, delay: f32) -> Self {
        Self {
            settled: value,
            pending: None,
            delay,
        }
    }

    /// Value everything downstream should use
    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Offer a new value; each change restarts the delay
    pub fn set(&mut self, value: T) {
        if self.pending.as_ref().is_some_and(|(pending, _)| *pending == value) {
            return;
        }
        self.pending = (self.settled != value).then_some((value, 0.0));
    }

    /// Advance by `dt` seconds; returns true when a new value settled
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some((_, waited)) = &mut self.pending else {
            return false;
        };
        *waited += dt;
        if *waited < self.delay {
            return false;
        }
        if let Some((value, _)) = self.pending.take() {
            self.settled = value;
        }
        true
    }
}
