//! Interrupt dispatcher boundary.

use crate::EdgeHandler;

/// Edge condition that fires the interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    RisingEdge,
    FallingEdge,
}

/// Error returned when a handler cannot be bound to an interrupt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// Another handler already owns this interrupt identity.
    IdInUse,
    /// The dispatcher cannot deliver the requested trigger.
    Unsupported,
}

/// Registration interface of the platform's interrupt controller.
///
/// `'h` is the lifetime of the registered handler: the dispatcher holds the
/// borrow until [`unregister`](Self::unregister) is called, which in practice
/// means the device instance lives in a `static` on real hardware.
pub trait InterruptDispatcher<'h> {
    type Id;

    /// Bind `handler` to the interrupt `id` for the given trigger. `tag` is
    /// a human-readable owner name for diagnostics.
    fn register(
        &self,
        id: Self::Id,
        trigger: Trigger,
        tag: &str,
        handler: &'h dyn EdgeHandler,
    ) -> Result<(), RegisterError>;

    /// Remove the binding. After this returns, no further handler
    /// invocations for `id` may be in flight.
    fn unregister(&self, id: &Self::Id);
}

impl<'h, T: InterruptDispatcher<'h>> InterruptDispatcher<'h> for &T {
    type Id = T::Id;

    fn register(
        &self,
        id: Self::Id,
        trigger: Trigger,
        tag: &str,
        handler: &'h dyn EdgeHandler,
    ) -> Result<(), RegisterError> {
        (**self).register(id, trigger, tag, handler)
    }

    fn unregister(&self, id: &Self::Id) {
        (**self).unregister(id);
    }
}
