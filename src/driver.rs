//! The device instance: attach/detach lifecycle and the toggle interrupt
//! handler.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::EdgeHandler;
use crate::binder::{Acquired, AttachError, OutputBank};
use crate::debounce::{DEFAULT_DEBOUNCE_WINDOW, Debounce};
use crate::irq::{InterruptDispatcher, Trigger};
use crate::line::{DeviceContext, LineProvider};
use crate::mask::OutputMask;

/// Device-description key holding the initial LED state (0 = all off,
/// anything else = all on).
pub const INITIAL_STATE_PROPERTY: &str = "initial-led-state";

/// Configuration for the driver instance.
#[derive(Debug, Clone, Copy)]
pub struct LedButtonConfig {
    /// Minimum spacing between two accepted button presses.
    pub debounce_window: Duration,
    /// Owner name passed to the interrupt dispatcher.
    pub tag: &'static str,
}

impl Default for LedButtonConfig {
    fn default() -> Self {
        Self {
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            tag: "ledbutton",
        }
    }
}

/// Everything the device owns while attached.
///
/// Exists only between a successful attach and the matching detach. The
/// interrupt handler and the control path share it through a critical
/// section, never through blocking locks.
struct Bound<P: LineProvider, const N: usize> {
    outputs: Vec<P::Handle, N>,
    input: P::Handle,
    irq: P::InterruptId,
    mask: OutputMask<N>,
    debounce: Debounce,
}

/// A button-toggles-LED-bank device with `N` output lines.
///
/// The instance is constructed once around its line provider and interrupt
/// dispatcher, then driven through [`attach`](Self::attach) and
/// [`detach`](Self::detach) by the platform's bus framework. While attached
/// it is also the registered [`EdgeHandler`] for the button's rising edge.
pub struct LedButtonDriver<P: LineProvider, D, const N: usize> {
    provider: P,
    dispatcher: D,
    config: LedButtonConfig,
    shared: Mutex<RefCell<Option<Bound<P, N>>>>,
}

impl<P: LineProvider, D, const N: usize> LedButtonDriver<P, D, N> {
    pub const fn new(provider: P, dispatcher: D, config: LedButtonConfig) -> Self {
        Self {
            provider,
            dispatcher,
            config,
            shared: Mutex::new(RefCell::new(None)),
        }
    }

    /// Whether the device currently owns its lines.
    pub fn is_attached(&self) -> bool {
        critical_section::with(|cs| self.shared.borrow(cs).borrow().is_some())
    }

    /// Current output mask, `None` while detached.
    pub fn mask(&self) -> Option<OutputMask<N>> {
        critical_section::with(|cs| self.shared.borrow(cs).borrow().as_ref().map(|b| b.mask))
    }
}

impl<P, D, const N: usize> LedButtonDriver<P, D, N>
where
    P: LineProvider + Sync,
    P::Context: DeviceContext,
    P::Handle: Send,
    P::InterruptId: Clone + Send,
    D: Sync,
{
    /// Bring the device up.
    ///
    /// Acquires the `N` output lines in index order, then the button input,
    /// registers the rising-edge handler, reads the initial-state property
    /// and drives the initial mask. Any failure rolls back every step that
    /// succeeded, in reverse order, and nothing stays acquired.
    ///
    /// Takes `&'h self` because the dispatcher holds the handler borrow
    /// until detach; on real hardware the instance lives in a `static`.
    pub fn attach<'h>(&'h self, ctx: &P::Context) -> Result<(), AttachError>
    where
        D: InterruptDispatcher<'h, Id = P::InterruptId>,
    {
        if self.is_attached() {
            return Err(AttachError::AlreadyAttached);
        }

        // Guards roll back on early return: locals drop in reverse
        // declaration order, so the input line is released before the
        // outputs, and the bank itself releases back to front.
        let outputs = OutputBank::acquire(&self.provider, ctx)?;
        let input = Acquired::input(&self.provider, ctx)?;

        let irq = self.provider.to_interrupt_id(input.handle());
        self.dispatcher
            .register(irq.clone(), Trigger::RisingEdge, self.config.tag, self)
            .map_err(|_| AttachError::InterruptRegistrationFailed)?;

        let mask = match ctx.read_property(INITIAL_STATE_PROPERTY) {
            Some(0) => OutputMask::all_off(),
            Some(_) => OutputMask::all_on(),
            None => {
                warn!("{} property not found, defaulting to all-on", INITIAL_STATE_PROPERTY);
                OutputMask::all_on()
            }
        };

        let bound = Bound {
            outputs: outputs.into_lines(),
            input: input.into_handle(),
            irq,
            mask,
            debounce: Debounce::new(self.config.debounce_window),
        };

        // Install the state and drive the initial mask in one critical
        // section. An edge delivered between registration and this point
        // finds no state and is ignored.
        critical_section::with(|cs| {
            mask.apply_to(|index, level| self.provider.set_level(&bound.outputs[index], level));
            *self.shared.borrow(cs).borrow_mut() = Some(bound);
        });

        info!("device attached, {} output lines", N);
        Ok(())
    }

    /// Tear the device down. Best-effort and never fails outward.
    ///
    /// Drives every output low, unregisters the interrupt, releases the
    /// input line, then releases the output lines in reverse index order.
    /// A detach without a preceding attach is a logged no-op.
    pub fn detach<'h>(&self)
    where
        D: InterruptDispatcher<'h, Id = P::InterruptId>,
    {
        let bound = critical_section::with(|cs| self.shared.borrow(cs).take());
        let Some(mut bound) = bound else {
            warn!("detach on a device that is not attached");
            return;
        };

        OutputMask::<N>::all_off()
            .apply_to(|index, level| self.provider.set_level(&bound.outputs[index], level));

        // Unregister before releasing any line so no handler invocation can
        // observe a released resource.
        self.dispatcher.unregister(&bound.irq);
        self.provider.release(bound.input);
        while let Some(line) = bound.outputs.pop() {
            self.provider.release(line);
        }

        info!("device detached");
    }
}

impl<P, D, const N: usize> EdgeHandler for LedButtonDriver<P, D, N>
where
    P: LineProvider + Sync,
    P::Handle: Send,
    P::InterruptId: Send,
    D: Sync,
{
    /// The toggle state machine.
    ///
    /// Within one critical section: drop the event if the device is not
    /// (yet) attached, drop it if it falls inside the debounce window,
    /// otherwise complement the mask and write every line. Rejected events
    /// are gone for good; nothing is queued or retried.
    fn on_rising_edge(&self, now: Instant) {
        critical_section::with(|cs| {
            let mut state = self.shared.borrow(cs).borrow_mut();
            let Some(bound) = state.as_mut() else {
                return;
            };
            if !bound.debounce.accept(now) {
                return;
            }
            bound.mask = bound.mask.toggled();
            let mask = bound.mask;
            mask.apply_to(|index, level| self.provider.set_level(&bound.outputs[index], level));
        });
    }
}
