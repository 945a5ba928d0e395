//! NVIDIA Tegra186 GPIO port controller driver.
//!
//! Pin-control registers are split across two register windows:
//!
//! 1. Main complex, bank controllers 0-5
//! 2. Always-on complex, bank controller 6
//!
//! The platform layer maps both windows, collects the bank-level interrupt
//! lines and constructs a [TegraGpio] from them, then calls
//! [Device::enable] and routes every bank interrupt into
//! [TegraGpio::handle_bank_irq].
//!
//! Some ports belong to a different execution domain: every operation first
//! consults the per-pin security register and treats pins without full
//! access as non-existent.

pub mod regs;
pub mod topology;
pub mod wake;

mod irq;

#[cfg(test)]
pub(crate) mod testutil;

use core::fmt::{self, Write};
use error::Errno;
use tock_registers::fields::FieldValue;

use crate::dev::gpio::{GpioChip, PinDirection, PinId, Pinmux};
use crate::dev::irq::{IrqLines, IrqNumber, LineHandle};
use crate::dev::wakeup::WakeupControl;
use crate::dev::Device;
use crate::mmio::RegisterWindow;
use regs::{
    ScrAccess, CONFIG, CONFIG_REG, DEBOUNCE_THRESHOLD, DEBOUNCE_THRESHOLD_REG, INPUT_REG,
    INT_CLEAR_REG, OUT_CONTROL_REG, OUT_VALUE_REG,
};
use topology::{RegWindow, MAX_BANKS, NUM_PINS, PORT_NAMES, PORT_TABLE};

/// One discovered bank controller and its demultiplexed interrupt line
#[derive(Clone, Copy)]
struct BankRecord {
    index: usize,
    irq: IrqNumber,
}

/// Driver context for the GPIO controller complex.
///
/// Constructed once per system from bus-provided resources and passed by
/// reference into every operation; all tables are fixed-size and immutable
/// after construction. Every register access touches only the target pin's
/// own register words and relies on the register bus serializing individual
/// transactions; read-modify-write of a single pin's configuration is not
/// atomic, so concurrent configuration of one pin is the caller's to
/// serialize. Cross-pin operations never contend.
pub struct TegraGpio<'a> {
    windows: [RegisterWindow; RegWindow::COUNT],
    banks: [Option<BankRecord>; MAX_BANKS],
    lines: &'a (dyn IrqLines + Sync),
    pinmux: &'a (dyn Pinmux + Sync),
    wakeup: &'a (dyn WakeupControl + Sync),
}

impl<'a> TegraGpio<'a> {
    /// Constructs the driver context.
    ///
    /// `windows` holds the mapped register window per [RegWindow] variant, in
    /// selector order. `bank_irqs` lists the bank-level interrupt lines in
    /// controller order; supplying none of them means no controller exists
    /// and initialization fails. No hardware is touched here.
    pub fn new(
        windows: [RegisterWindow; RegWindow::COUNT],
        bank_irqs: &[IrqNumber],
        lines: &'a (dyn IrqLines + Sync),
        pinmux: &'a (dyn Pinmux + Sync),
        wakeup: &'a (dyn WakeupControl + Sync),
    ) -> Result<Self, Errno> {
        if bank_irqs.is_empty() {
            errorln!("No GPIO bank interrupt lines supplied");
            return Err(Errno::DoesNotExist);
        }
        if bank_irqs.len() > MAX_BANKS {
            warnln!(
                "Ignoring {} surplus bank interrupt lines",
                bank_irqs.len() - MAX_BANKS
            );
        }

        let mut banks = [None; MAX_BANKS];
        for (index, &irq) in bank_irqs.iter().take(MAX_BANKS).enumerate() {
            banks[index] = Some(BankRecord { index, irq });
        }

        Ok(Self {
            windows,
            banks,
            lines,
            pinmux,
            wakeup,
        })
    }

    /// Returns the bank-level interrupt line of bank controller `bank`
    pub fn bank_irq(&self, bank: usize) -> Option<IrqNumber> {
        self.banks.get(bank).copied().flatten().map(|b| b.irq)
    }

    #[inline(always)]
    fn window(&self, window: RegWindow) -> &RegisterWindow {
        &self.windows[window.index()]
    }

    fn readl(&self, pin: PinId, reg: u32) -> u32 {
        let (window, addr) = topology::pin_address(pin, reg);
        self.window(window).read(addr)
    }

    fn writel(&self, value: u32, pin: PinId, reg: u32) {
        let (window, addr) = topology::pin_address(pin, reg);
        self.window(window).write(addr, value)
    }

    fn modify_config(&self, pin: PinId, change: FieldValue<u32, CONFIG::Register>) {
        let value = self.readl(pin, CONFIG_REG);
        self.writel(change.modify(value), pin, CONFIG_REG);
    }

    /// Returns `true` when this execution domain holds full access to `pin`.
    ///
    /// Pins past their port's wired count and ports absent from this chip
    /// variant are rejected without touching the bus. The security register
    /// is re-read on every call instead of cached: a stale trust decision
    /// could let a write through to memory owned by another domain.
    pub fn is_accessible(&self, pin: PinId) -> bool {
        if pin.index() >= NUM_PINS {
            return false;
        }

        let port = &PORT_TABLE[pin.port()];
        if pin.pin() >= port.pins as usize {
            return false;
        }
        if port.controller.is_none() {
            return false;
        }

        let (window, addr) = topology::scr_address(pin);
        let scr = ScrAccess::from_bits_truncate(self.window(window).read(addr));
        scr.contains(ScrAccess::FULL_ACCESS)
    }

    fn check_access(&self, pin: PinId) -> Result<(), Errno> {
        if self.is_accessible(pin) {
            Ok(())
        } else {
            Err(Errno::Busy)
        }
    }

    fn enable_pin(&self, pin: PinId) {
        self.modify_config(pin, CONFIG::ENABLE::SET);
    }

    fn disable_pin(&self, pin: PinId) {
        self.modify_config(pin, CONFIG::ENABLE::CLEAR);
    }

    fn set_direction_mode(&self, pin: PinId, output: bool) {
        self.modify_config(
            pin,
            if output {
                CONFIG::DIRECTION::Output
            } else {
                CONFIG::DIRECTION::Input
            },
        );
    }

    fn set_value(&self, pin: PinId, value: bool) {
        // The value must be committed before tri-state is released, else a
        // transient undefined level can appear on the pin
        self.writel(value as u32, pin, OUT_VALUE_REG);
        self.writel(0, pin, OUT_CONTROL_REG);
    }

    /// Writes a human-readable dump of every accessible pin's six registers
    /// into `out`. Not a stable machine format.
    pub fn dump(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        writeln!(out, "Port:Pin:CNF DBC IN OUT_CTRL OUT_VAL INT_CLR")?;

        for index in 0..NUM_PINS {
            let pin = PinId::new(index as u16);
            if !self.is_accessible(pin) {
                continue;
            }

            writeln!(
                out,
                "{}:{} {:#x} {:#x} {:#x} {:#x} {:#x} {:#x}",
                PORT_NAMES[pin.port()],
                pin.pin(),
                self.readl(pin, CONFIG_REG),
                self.readl(pin, DEBOUNCE_THRESHOLD_REG),
                self.readl(pin, INPUT_REG),
                self.readl(pin, OUT_CONTROL_REG),
                self.readl(pin, OUT_VALUE_REG),
                self.readl(pin, INT_CLEAR_REG),
            )?;
        }
        Ok(())
    }
}

impl Device for TegraGpio<'_> {
    fn name(&self) -> &'static str {
        "NVIDIA Tegra186 GPIO Controller"
    }

    unsafe fn enable(&self) -> Result<(), Errno> {
        // One interrupt line per pin, created up front and kept for the
        // lifetime of the system; a registry failure midway disposes
        // everything created so far
        for index in 0..NUM_PINS {
            let pin = PinId::new(index as u16);

            if let Err(err) = self.lines.create_mapping(pin) {
                errorln!("Could not map interrupt line for pin {}: {:?}", index, err);
                for created in (0..index).map(|i| PinId::new(i as u16)) {
                    if let Some(line) = self.lines.find_mapping(created) {
                        self.lines.dispose_mapping(line);
                    }
                }
                return Err(err);
            }

            // Interrupts start out masked on every pin this domain owns
            if self.is_accessible(pin) {
                self.modify_config(pin, CONFIG::INTERRUPT::CLEAR);
            }
        }

        Ok(())
    }
}

impl GpioChip for TegraGpio<'_> {
    fn request(&self, pin: PinId) -> Result<(), Errno> {
        self.check_access(pin)?;
        self.pinmux.request(pin)
    }

    fn free(&self, pin: PinId) {
        self.pinmux.free(pin);
        if self.is_accessible(pin) {
            self.disable_pin(pin);
        }
    }

    fn direction(&self, pin: PinId) -> Result<PinDirection, Errno> {
        // Pins outside this domain read back as inert inputs
        if !self.is_accessible(pin) {
            return Ok(PinDirection::Input);
        }

        let config = self.readl(pin, CONFIG_REG);
        if CONFIG::DIRECTION.read(config) != 0 {
            Ok(PinDirection::Output)
        } else {
            Ok(PinDirection::Input)
        }
    }

    fn direction_input(&self, pin: PinId) -> Result<(), Errno> {
        self.check_access(pin)?;

        self.set_direction_mode(pin, false);
        self.enable_pin(pin);

        self.pinmux.set_direction(pin, true).map_err(|err| {
            errorln!("Pin {}: pinmux rejected input direction: {:?}", pin.index(), err);
            err
        })
    }

    fn direction_output(&self, pin: PinId, value: bool) -> Result<(), Errno> {
        self.check_access(pin)?;

        self.set_value(pin, value);
        self.set_direction_mode(pin, true);
        self.enable_pin(pin);

        self.pinmux.set_direction(pin, false).map_err(|err| {
            errorln!("Pin {}: pinmux rejected output direction: {:?}", pin.index(), err);
            err
        })
    }

    fn read(&self, pin: PinId) -> Result<bool, Errno> {
        if !self.is_accessible(pin) {
            return Ok(false);
        }

        // Output pins read back their programmed value, mirroring the
        // hardware's own readback behavior
        let config = self.readl(pin, CONFIG_REG);
        let value = if CONFIG::DIRECTION.read(config) != 0 {
            self.readl(pin, OUT_VALUE_REG)
        } else {
            self.readl(pin, INPUT_REG)
        };

        Ok(value & 1 != 0)
    }

    fn write(&self, pin: PinId, value: bool) -> Result<(), Errno> {
        self.check_access(pin)?;
        self.set_value(pin, value);
        Ok(())
    }

    fn set_debounce(&self, pin: PinId, debounce_us: u32) -> Result<(), Errno> {
        self.check_access(pin)?;

        // Threshold is in whole milliseconds, rounded up; the register field
        // is 8 bits wide and silently truncates larger values
        let threshold = debounce_us / 1000 + (debounce_us % 1000 != 0) as u32;

        self.enable_pin(pin);
        self.modify_config(pin, CONFIG::DEBOUNCE::SET);
        self.writel(
            DEBOUNCE_THRESHOLD::THRESHOLD.val(threshold).modify(0),
            pin,
            DEBOUNCE_THRESHOLD_REG,
        );
        Ok(())
    }

    fn to_irq(&self, pin: PinId) -> Result<LineHandle, Errno> {
        self.lines.find_mapping(pin).ok_or(Errno::DoesNotExist)
    }
}
