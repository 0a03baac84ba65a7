//! Hardware line boundary.
//!
//! The driver never touches pins directly; it resolves named lines through a
//! [`LineProvider`] supplied by the platform (device tree, platform bus, or a
//! test double). All calls must be non-blocking: `set_level` in particular is
//! invoked from interrupt context.

/// Which named line is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// An output line of the LED bank.
    Led,
    /// The single button input line.
    Button,
}

impl Role {
    /// The line name used by the hardware description.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Led => "led",
            Self::Button => "button",
        }
    }
}

/// Error returned when a named line cannot be resolved or configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// No line with that role/index exists in the device description.
    NotFound,
    /// The line exists but is held by someone else.
    Busy,
}

/// Access to named hardware lines.
///
/// `Context` is the opaque per-device handle the platform passes to attach;
/// `Handle` is whatever the platform uses to address an acquired line.
pub trait LineProvider {
    type Context;
    type Handle;
    type InterruptId;

    /// Request output line `index` of the given role, configured as an
    /// output driving `initial_level`.
    fn request_output_line(
        &self,
        ctx: &Self::Context,
        role: Role,
        index: usize,
        initial_level: bool,
    ) -> Result<Self::Handle, LineError>;

    /// Request the single input line of the given role.
    fn request_input_line(&self, ctx: &Self::Context, role: Role)
    -> Result<Self::Handle, LineError>;

    /// Drive an acquired output line to a logic level. Infallible once the
    /// line is acquired; must not block.
    fn set_level(&self, line: &Self::Handle, level: bool);

    /// Return an acquired line to the provider.
    fn release(&self, line: Self::Handle);

    /// Derive the interrupt identity of an acquired input line.
    fn to_interrupt_id(&self, line: &Self::Handle) -> Self::InterruptId;
}

impl<T: LineProvider> LineProvider for &T {
    type Context = T::Context;
    type Handle = T::Handle;
    type InterruptId = T::InterruptId;

    fn request_output_line(
        &self,
        ctx: &Self::Context,
        role: Role,
        index: usize,
        initial_level: bool,
    ) -> Result<Self::Handle, LineError> {
        (**self).request_output_line(ctx, role, index, initial_level)
    }

    fn request_input_line(
        &self,
        ctx: &Self::Context,
        role: Role,
    ) -> Result<Self::Handle, LineError> {
        (**self).request_input_line(ctx, role)
    }

    fn set_level(&self, line: &Self::Handle, level: bool) {
        (**self).set_level(line, level);
    }

    fn release(&self, line: Self::Handle) {
        (**self).release(line);
    }

    fn to_interrupt_id(&self, line: &Self::Handle) -> Self::InterruptId {
        (**self).to_interrupt_id(line)
    }
}

/// Read-only view of the device description attached to a context.
pub trait DeviceContext {
    /// Read an integer property by key. `None` when the property is absent
    /// or unreadable.
    fn read_property(&self, key: &str) -> Option<u32>;
}

impl<T: DeviceContext> DeviceContext for &T {
    fn read_property(&self, key: &str) -> Option<u32> {
        (**self).read_property(key)
    }
}
