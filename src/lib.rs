#![no_std]

#[macro_use]
mod fmt;

pub mod binder;
pub mod debounce;
pub mod driver;
pub mod irq;
pub mod line;
pub mod mask;

pub use binder::AttachError;
pub use debounce::{DEFAULT_DEBOUNCE_WINDOW, Debounce};
pub use driver::{INITIAL_STATE_PROPERTY, LedButtonConfig, LedButtonDriver};
pub use irq::{InterruptDispatcher, RegisterError, Trigger};
pub use line::{DeviceContext, LineError, LineProvider, Role};
pub use mask::OutputMask;

pub use embassy_time::{Duration, Instant};

/// Rising-edge interrupt handler
///
/// Implemented by the device instance and registered with an
/// [`InterruptDispatcher`]. The dispatcher may invoke it from interrupt
/// context on any core, so implementations must be `Sync` and must not
/// block.
pub trait EdgeHandler: Sync {
    /// Called once per low-to-high transition on the bound input line.
    fn on_rising_edge(&self, now: Instant);
}

impl<T: EdgeHandler> EdgeHandler for &T {
    fn on_rising_edge(&self, now: Instant) {
        (**self).on_rising_edge(now);
    }
}
