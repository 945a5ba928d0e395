//! Per-pin interrupt chip and the bank-level chained demultiplexer

use super::regs::{CONFIG, INT_CLEAR_REG, INT_STATUS_REG};
use super::topology::{PORTS_PER_BANK, PORT_TABLE};
use super::{wake, TegraGpio};
use crate::dev::gpio::{PinId, PINS_PER_PORT};
use crate::dev::irq::{IrqChip, IrqTrigger};
use error::Errno;

impl IrqChip for TegraGpio<'_> {
    fn ack(&self, pin: PinId) -> Result<(), Errno> {
        self.check_access(pin)?;
        self.writel(1, pin, INT_CLEAR_REG);
        Ok(())
    }

    fn mask(&self, pin: PinId) -> Result<(), Errno> {
        self.check_access(pin)?;
        self.modify_config(pin, CONFIG::INTERRUPT::CLEAR);
        Ok(())
    }

    fn unmask(&self, pin: PinId) -> Result<(), Errno> {
        self.check_access(pin)?;
        self.modify_config(pin, CONFIG::INTERRUPT::SET);
        Ok(())
    }

    fn set_trigger(&self, pin: PinId, raw: u32) -> Result<(), Errno> {
        // Unsupported flag words are rejected before any register access
        let trigger = IrqTrigger::from_raw(raw)?;
        self.check_access(pin)?;

        let change = match trigger {
            IrqTrigger::RisingEdge => CONFIG::TRIGGER::SingleEdge + CONFIG::POLARITY::High,
            IrqTrigger::FallingEdge => CONFIG::TRIGGER::SingleEdge + CONFIG::POLARITY::Low,
            IrqTrigger::BothEdges => CONFIG::TRIGGER::BothEdges + CONFIG::POLARITY::Low,
            IrqTrigger::LevelHigh => CONFIG::TRIGGER::Level + CONFIG::POLARITY::High,
            IrqTrigger::LevelLow => CONFIG::TRIGGER::Level + CONFIG::POLARITY::Low,
        };

        self.modify_config(pin, change);
        self.enable_pin(pin);

        // Level-triggered sources stay asserted until acknowledged; telling
        // the generic layer the wrong discipline causes interrupt storms or
        // missed events
        if let Some(line) = self.lines.find_mapping(pin) {
            self.lines.set_discipline(line, trigger.discipline());
        }

        if let Some(slot) = wake::wake_slot(pin) {
            if let Err(err) = self.wakeup.set_wake_type(slot, trigger) {
                errorln!("wake{}: could not record trigger type: {:?}", slot, err);
                return Err(err);
            }
        }

        Ok(())
    }

    fn set_wake(&self, pin: PinId, enabled: bool) -> Result<(), Errno> {
        let slot = wake::wake_slot(pin).ok_or(Errno::NotSupported)?;

        self.wakeup.set_wake_enabled(slot, enabled).map_err(|err| {
            errorln!(
                "wake{}: could not {} wake for pin {}: {:?}",
                slot,
                if enabled { "enable" } else { "disable" },
                pin.index(),
                err
            );
            err
        })
    }
}

impl TegraGpio<'_> {
    /// Demultiplexes a pending bank-level interrupt into per-pin dispatches.
    ///
    /// Runs in interrupt context: fixed-size stack-local state only, no
    /// allocation, no blocking. Within one invocation dispatch order is
    /// deterministic, ascending port slot then ascending pin bit; across
    /// invocations there is no ordering relative to other banks.
    pub fn handle_bank_irq(&self, bank: usize) {
        let record = match self.banks.get(bank).copied().flatten() {
            Some(record) => record,
            None => return,
        };

        // Slot map is rebuilt from the port table on every invocation;
        // 32 fixed iterations over const data
        let mut slots: [Option<usize>; PORTS_PER_BANK] = [None; PORTS_PER_BANK];
        for (port, desc) in PORT_TABLE.iter().enumerate() {
            if desc.controller == Some(record.index as u8) {
                slots[desc.index as usize] = Some(port);
            }
        }

        self.lines.chained_enter(record.irq);

        for port in slots.iter().copied().flatten() {
            let desc = &PORT_TABLE[port];
            let status = self.window(desc.window).read(desc.reg_base + INT_STATUS_REG);

            for bit in 0..PINS_PER_PORT {
                if status & (1 << bit) == 0 {
                    continue;
                }

                let pin = PinId::from_parts(port, bit);
                match self.lines.find_mapping(pin) {
                    Some(line) => self.lines.dispatch(line),
                    None => warnln!("No interrupt mapping for pending pin {}", pin.index()),
                }
            }
        }

        self.lines.chained_exit(record.irq);
    }
}
