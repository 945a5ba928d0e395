//! Wake-event registry interface

use crate::dev::irq::IrqTrigger;
use error::Errno;

/// Power-management wake-event registry collaborator.
///
/// Slots are chip-level wake event indices; the GPIO driver resolves pins to
/// slots through its own wake table before calling in here.
pub trait WakeupControl {
    /// Records the trigger condition armed for wake `slot`
    fn set_wake_type(&self, slot: usize, trigger: IrqTrigger) -> Result<(), Errno>;

    /// Arms or disarms wake `slot`
    fn set_wake_enabled(&self, slot: usize, enabled: bool) -> Result<(), Errno>;
}
