//! Driver for the NVIDIA Tegra186 GPIO controller complex.
//!
//! The controller is split across two memory-mapped register windows (the
//! main complex and the always-on domain), each containing per-port register
//! blocks. Ports group up to 8 pins; every pin carries its own configuration,
//! debounce, input, output and interrupt-clear registers, plus a security
//! register deciding whether this execution domain may touch the pin at all.
//!
//! The platform layer discovers the register windows and the bank-level
//! interrupt lines and hands them to [gpio::TegraGpio]; pin multiplexing,
//! generic interrupt-line bookkeeping and wake-event registration stay
//! behind the collaborator traits in [dev].
#![no_std]
#![warn(missing_docs)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[macro_use]
extern crate cfg_if;
#[macro_use]
extern crate bitflags;

#[macro_use]
pub mod debug;

pub mod arch;
pub mod dev;
pub mod gpio;
pub mod mmio;
pub mod sync;
pub mod util;
