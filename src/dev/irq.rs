//! Interrupt controller and interrupt-line interfaces

use crate::dev::gpio::PinId;
use crate::dev::Device;
use error::Errno;

/// Raw trigger flag words accepted by [IrqChip::set_trigger]
pub mod trigger {
    /// Fire on a low-to-high transition
    pub const RISING_EDGE: u32 = 0x1;
    /// Fire on a high-to-low transition
    pub const FALLING_EDGE: u32 = 0x2;
    /// Fire on any transition
    pub const BOTH_EDGES: u32 = 0x3;
    /// Assert while the line is high
    pub const LEVEL_HIGH: u32 = 0x4;
    /// Assert while the line is low
    pub const LEVEL_LOW: u32 = 0x8;
}

/// Interrupt trigger condition of a pin
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IrqTrigger {
    /// Fire on a low-to-high transition
    RisingEdge,
    /// Fire on a high-to-low transition
    FallingEdge,
    /// Fire on any transition
    BothEdges,
    /// Assert while the line is high
    LevelHigh,
    /// Assert while the line is low
    LevelLow,
}

/// Acknowledgment discipline of a dispatched interrupt line
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IrqDiscipline {
    /// Single dispatch per transition, source self-clears
    Edge,
    /// Stays asserted until the source is acknowledged after servicing
    Level,
}

impl IrqTrigger {
    /// Parses a raw trigger flag word.
    ///
    /// Flag words other than the five supported trigger conditions are
    /// rejected with [Errno::InvalidArgument].
    pub fn from_raw(raw: u32) -> Result<Self, Errno> {
        match raw {
            trigger::RISING_EDGE => Ok(Self::RisingEdge),
            trigger::FALLING_EDGE => Ok(Self::FallingEdge),
            trigger::BOTH_EDGES => Ok(Self::BothEdges),
            trigger::LEVEL_HIGH => Ok(Self::LevelHigh),
            trigger::LEVEL_LOW => Ok(Self::LevelLow),
            _ => Err(Errno::InvalidArgument),
        }
    }

    /// Returns the dispatch discipline matching this trigger condition
    pub const fn discipline(self) -> IrqDiscipline {
        match self {
            Self::LevelHigh | Self::LevelLow => IrqDiscipline::Level,
            _ => IrqDiscipline::Edge,
        }
    }
}

/// Platform-level interrupt line number
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IrqNumber(usize);

impl IrqNumber {
    /// Wraps an interrupt line number
    #[inline(always)]
    pub const fn new(v: usize) -> Self {
        Self(v)
    }

    /// Returns numeric representation for given [IrqNumber]
    #[inline(always)]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Handle to one pin's mapped interrupt line inside the platform registry
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LineHandle(usize);

impl LineHandle {
    /// Wraps a registry-assigned line number
    #[inline(always)]
    pub const fn new(v: usize) -> Self {
        Self(v)
    }

    /// Returns numeric representation for given [LineHandle]
    #[inline(always)]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Per-pin interrupt chip interface
pub trait IrqChip: Device {
    /// Clears `pin`'s latched interrupt status
    fn ack(&self, pin: PinId) -> Result<(), Errno>;

    /// Disables interrupt generation for `pin`, keeping its trigger
    /// configuration intact
    fn mask(&self, pin: PinId) -> Result<(), Errno>;

    /// Re-enables interrupt generation for `pin`
    fn unmask(&self, pin: PinId) -> Result<(), Errno>;

    /// Programs `pin`'s trigger condition from a raw flag word
    fn set_trigger(&self, pin: PinId, raw: u32) -> Result<(), Errno>;

    /// Enables or disables system wakeup through `pin`
    fn set_wake(&self, pin: PinId, enabled: bool) -> Result<(), Errno>;
}

/// Generic interrupt-line registry collaborator.
///
/// Owns the pin-to-line bijection and the per-line handler bookkeeping; the
/// GPIO driver only creates mappings at startup and dispatches into them
/// while demultiplexing.
pub trait IrqLines {
    /// Allocates an interrupt line for `pin`
    fn create_mapping(&self, pin: PinId) -> Result<LineHandle, Errno>;

    /// Releases a line previously returned by [IrqLines::create_mapping]
    fn dispose_mapping(&self, line: LineHandle);

    /// Returns the line mapped to `pin`, if any
    fn find_mapping(&self, pin: PinId) -> Option<LineHandle>;

    /// Selects the acknowledgment discipline used when dispatching `line`
    fn set_discipline(&self, line: LineHandle, discipline: IrqDiscipline);

    /// Invokes the handler currently registered for `line`, synchronously
    fn dispatch(&self, line: LineHandle);

    /// Marks the start of chained demultiplexing of bank interrupt `irq`
    fn chained_enter(&self, irq: IrqNumber);

    /// Marks the end of chained demultiplexing of bank interrupt `irq`
    fn chained_exit(&self, irq: IrqNumber);
}
