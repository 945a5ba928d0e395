//! Tegra186 GPIO register layout.
//!
//! Every pin owns a 0x20-byte block of registers inside its port's general
//! register region, plus an 8-byte security block inside the port's security
//! region. Register offsets below are relative to the start of the pin's
//! block.

use tock_registers::register_bitfields;

/// Pin configuration register
pub const CONFIG_REG: u32 = 0x00;
/// Debounce threshold register
pub const DEBOUNCE_THRESHOLD_REG: u32 = 0x04;
/// Input status register
pub const INPUT_REG: u32 = 0x08;
/// Output control (tri-state) register; 0 drives the pin, 1 floats it
pub const OUT_CONTROL_REG: u32 = 0x0C;
/// Output value register
pub const OUT_VALUE_REG: u32 = 0x10;
/// Interrupt clear register
pub const INT_CLEAR_REG: u32 = 0x14;

/// Byte distance between consecutive pins' register blocks within a port
pub const PIN_STRIDE: u32 = 0x20;

/// Offset of the per-port pending-interrupt bitmap, relative to the port's
/// general register block (one status bit per pin slot)
pub const INT_STATUS_REG: u32 = 0x100 + 0x04;

/// Offset of the security register within a pin's security block
pub const SCR_REG: u32 = 0x04;
/// Byte distance between consecutive pins' security blocks
pub const SCR_STRIDE: u32 = 0x08;

register_bitfields! {
    u32,

    /// Pin configuration register fields
    pub CONFIG [
        /// Routes the pad to the GPIO function
        ENABLE OFFSET(0) NUMBITS(1) [],
        /// Pin data direction
        DIRECTION OFFSET(1) NUMBITS(1) [
            Input = 0,
            Output = 1
        ],
        /// Interrupt trigger kind
        TRIGGER OFFSET(2) NUMBITS(2) [
            None = 0,
            Level = 1,
            SingleEdge = 2,
            BothEdges = 3
        ],
        /// Trigger polarity for the level and single-edge kinds
        POLARITY OFFSET(4) NUMBITS(1) [
            Low = 0,
            High = 1
        ],
        /// Debounce function enable
        DEBOUNCE OFFSET(5) NUMBITS(1) [],
        /// Pin interrupt enable
        INTERRUPT OFFSET(6) NUMBITS(1) [],
        /// Input event timestamping enable
        TIMESTAMP OFFSET(7) NUMBITS(1) []
    ],

    /// Debounce threshold register fields
    pub DEBOUNCE_THRESHOLD [
        /// Debounce period, whole milliseconds
        THRESHOLD OFFSET(0) NUMBITS(8) []
    ]
}

bitflags! {
    /// Security register capability bits
    pub struct ScrAccess: u32 {
        /// Group-1 read permission
        const G1R = 1 << 1;
        /// Group-1 write permission
        const G1W = 1 << 9;
        /// Register read enable
        const REN = 1 << 27;
        /// Register write enable
        const WEN = 1 << 28;
        /// Capability set required for this domain to drive a pin; anything
        /// less leaves the pin to another execution domain
        const FULL_ACCESS = Self::WEN.bits | Self::REN.bits | Self::G1R.bits | Self::G1W.bits;
    }
}
