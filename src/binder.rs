//! Scope-bound acquisition of the device's hardware lines.
//!
//! Every acquired line lives inside a guard whose `Drop` returns it to the
//! provider, so a failure anywhere on the attach path rolls back by letting
//! the partially built guards fall out of scope. The observable release
//! order is the strict reverse of acquisition order: [`OutputBank`] pops
//! from the back, and attach declares its guards so that later acquisitions
//! drop first.

use heapless::Vec;

use crate::line::{LineProvider, Role};

/// Why attach failed. All variants imply a full rollback: nothing stays
/// acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// A named line could not be resolved or configured. `index` is `None`
    /// for the button line.
    LineUnavailable { role: Role, index: Option<usize> },
    /// Handler binding failed after all lines were acquired.
    InterruptRegistrationFailed,
    /// The device instance is already attached; detach it first.
    AlreadyAttached,
}

/// A single acquired line, released on drop unless disarmed.
pub(crate) struct Acquired<'p, P: LineProvider> {
    provider: &'p P,
    handle: Option<P::Handle>,
}

impl<'p, P: LineProvider> Acquired<'p, P> {
    /// Acquire the button input line.
    pub(crate) fn input(provider: &'p P, ctx: &P::Context) -> Result<Self, AttachError> {
        let handle = provider
            .request_input_line(ctx, Role::Button)
            .map_err(|_| AttachError::LineUnavailable {
                role: Role::Button,
                index: None,
            })?;
        Ok(Self {
            provider,
            handle: Some(handle),
        })
    }

    pub(crate) fn handle(&self) -> &P::Handle {
        match &self.handle {
            Some(handle) => handle,
            None => unreachable!(),
        }
    }

    /// Disarm the guard and take ownership of the handle.
    pub(crate) fn into_handle(mut self) -> P::Handle {
        match self.handle.take() {
            Some(handle) => handle,
            None => unreachable!(),
        }
    }
}

impl<P: LineProvider> Drop for Acquired<'_, P> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.provider.release(handle);
        }
    }
}

/// The ordered bank of output lines, acquired front to back and released
/// back to front.
pub(crate) struct OutputBank<'p, P: LineProvider, const N: usize> {
    provider: &'p P,
    lines: Vec<P::Handle, N>,
}

impl<'p, P: LineProvider, const N: usize> OutputBank<'p, P, N> {
    /// Acquire lines `"led"` 0..N in index order, configured as outputs
    /// driving low. A failure at index `i` releases indices `0..i` in
    /// reverse via drop.
    pub(crate) fn acquire(provider: &'p P, ctx: &P::Context) -> Result<Self, AttachError> {
        let mut bank = Self {
            provider,
            lines: Vec::new(),
        };
        for index in 0..N {
            let handle = provider
                .request_output_line(ctx, Role::Led, index, false)
                .map_err(|_| AttachError::LineUnavailable {
                    role: Role::Led,
                    index: Some(index),
                })?;
            if bank.lines.push(handle).is_err() {
                // The loop is bounded by the bank's capacity.
                unreachable!();
            }
        }
        Ok(bank)
    }

    /// Disarm the guard and take ownership of the handles.
    pub(crate) fn into_lines(mut self) -> Vec<P::Handle, N> {
        core::mem::take(&mut self.lines)
    }
}

impl<P: LineProvider, const N: usize> Drop for OutputBank<'_, P, N> {
    fn drop(&mut self) {
        while let Some(handle) = self.lines.pop() {
            self.provider.release(handle);
        }
    }
}
