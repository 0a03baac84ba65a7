//! Shared mock hardware for the integration tests.
//!
//! One `MockHardware` plays both boundary roles (line provider and interrupt
//! dispatcher) so a single ordered event log captures cross-boundary
//! ordering, e.g. that unregister happens before any line release.

#![allow(dead_code)]

use std::sync::Mutex;

use ledbutton_driver::{
    DeviceContext, EdgeHandler, Instant, InterruptDispatcher, LedButtonConfig, LedButtonDriver,
    LineError, LineProvider, RegisterError, Role, Trigger,
};

/// Line handle given to the driver. Outputs get their index, the button
/// gets `BUTTON_LINE`.
pub const BUTTON_LINE: u32 = 100;

/// Interrupt ids are derived as line + `IRQ_BASE`.
pub const IRQ_BASE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RequestOutput { index: usize, initial_level: bool },
    RequestInput,
    SetLevel { line: u32, level: bool },
    Release { line: u32 },
    Register { id: u32, trigger: Trigger, tag: String },
    Unregister { id: u32 },
}

#[derive(Debug, Default)]
pub struct MockContext {
    pub initial_led_state: Option<u32>,
}

impl DeviceContext for MockContext {
    fn read_property(&self, key: &str) -> Option<u32> {
        if key == "initial-led-state" {
            self.initial_led_state
        } else {
            None
        }
    }
}

#[derive(Default)]
pub struct MockHardware {
    pub fail_output_at: Option<usize>,
    pub fail_input: bool,
    pub fail_register: bool,
    /// Deliver an edge from inside `register`, i.e. before attach has
    /// installed the device state.
    pub fire_on_register: bool,
    events: Mutex<Vec<Event>>,
    handler: Mutex<Option<&'static dyn EdgeHandler>>,
}

impl MockHardware {
    /// Leak a fresh instance. The dispatcher keeps a `'static` borrow of the
    /// handler, mirroring a device instance living in a `static`.
    pub fn leaked() -> &'static Self {
        Box::leak(Box::new(Self::default()))
    }

    pub fn leaked_failing(
        fail_output_at: Option<usize>,
        fail_input: bool,
        fail_register: bool,
    ) -> &'static Self {
        Box::leak(Box::new(Self {
            fail_output_at,
            fail_input,
            fail_register,
            ..Self::default()
        }))
    }

    pub fn leaked_firing_on_register() -> &'static Self {
        Box::leak(Box::new(Self {
            fire_on_register: true,
            ..Self::default()
        }))
    }

    /// Deliver a rising edge to the registered handler, if any.
    pub fn fire(&self, now: Instant) {
        let handler = *self.handler.lock().unwrap();
        if let Some(handler) = handler {
            handler.on_rising_edge(now);
        }
    }

    pub fn has_handler(&self) -> bool {
        self.handler.lock().unwrap().is_some()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear_events(&self) {
        self.events.lock().unwrap().clear();
    }

    fn log(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl LineProvider for MockHardware {
    type Context = MockContext;
    type Handle = u32;
    type InterruptId = u32;

    fn request_output_line(
        &self,
        _ctx: &MockContext,
        role: Role,
        index: usize,
        initial_level: bool,
    ) -> Result<u32, LineError> {
        assert_eq!(role, Role::Led);
        if self.fail_output_at == Some(index) {
            return Err(LineError::NotFound);
        }
        self.log(Event::RequestOutput {
            index,
            initial_level,
        });
        Ok(index as u32)
    }

    fn request_input_line(&self, _ctx: &MockContext, role: Role) -> Result<u32, LineError> {
        assert_eq!(role, Role::Button);
        if self.fail_input {
            return Err(LineError::NotFound);
        }
        self.log(Event::RequestInput);
        Ok(BUTTON_LINE)
    }

    fn set_level(&self, line: &u32, level: bool) {
        self.log(Event::SetLevel { line: *line, level });
    }

    fn release(&self, line: u32) {
        self.log(Event::Release { line });
    }

    fn to_interrupt_id(&self, line: &u32) -> u32 {
        line + IRQ_BASE
    }
}

impl InterruptDispatcher<'static> for MockHardware {
    type Id = u32;

    fn register(
        &self,
        id: u32,
        trigger: Trigger,
        tag: &str,
        handler: &'static dyn EdgeHandler,
    ) -> Result<(), RegisterError> {
        if self.fail_register {
            return Err(RegisterError::Unsupported);
        }
        *self.handler.lock().unwrap() = Some(handler);
        self.log(Event::Register {
            id,
            trigger,
            tag: tag.to_string(),
        });
        if self.fire_on_register {
            handler.on_rising_edge(Instant::from_millis(0));
        }
        Ok(())
    }

    fn unregister(&self, id: &u32) {
        *self.handler.lock().unwrap() = None;
        self.log(Event::Unregister { id: *id });
    }
}

pub type TestDriver<const N: usize> =
    LedButtonDriver<&'static MockHardware, &'static MockHardware, N>;

/// Leak a driver wired to the given mock hardware.
pub fn leaked_driver<const N: usize>(
    hw: &'static MockHardware,
    config: LedButtonConfig,
) -> &'static TestDriver<N> {
    Box::leak(Box::new(LedButtonDriver::new(hw, hw, config)))
}
