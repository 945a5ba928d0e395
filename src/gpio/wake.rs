//! Wake-event slot assignments.
//!
//! The power-management controller exposes a fixed set of wake event slots;
//! a subset of them is hardwired to GPIO pins. Slots without a GPIO routing
//! stay `None` and pins absent from the table cannot wake the system.

use super::topology::ports;
use crate::dev::gpio::PinId;

/// Number of wake-event slots routed to the power-management controller
pub const WAKE_SLOTS: usize = 96;

const fn wired(port: usize, pin: usize) -> Option<PinId> {
    Some(PinId::from_parts(port, pin))
}

/// Wake slot to pin assignments for this chip variant
pub static WAKE_TABLE: [Option<PinId>; WAKE_SLOTS] = [
    wired(ports::A, 6),  // wake0
    wired(ports::A, 2),  // wake1
    wired(ports::A, 5),  // wake2
    wired(ports::D, 3),  // wake3
    wired(ports::E, 3),  // wake4
    wired(ports::G, 3),  // wake5
    None,                // wake6
    wired(ports::B, 3),  // wake7
    wired(ports::B, 5),  // wake8
    wired(ports::C, 0),  // wake9
    wired(ports::S, 2),  // wake10
    wired(ports::H, 2),  // wake11
    wired(ports::J, 5),  // wake12
    wired(ports::J, 6),  // wake13
    wired(ports::J, 7),  // wake14
    wired(ports::K, 0),  // wake15
    wired(ports::Q, 1),  // wake16
    wired(ports::F, 4),  // wake17
    wired(ports::M, 5),  // wake18
    wired(ports::P, 0),  // wake19
    wired(ports::P, 2),  // wake20
    wired(ports::P, 1),  // wake21
    wired(ports::O, 3),  // wake22
    wired(ports::R, 5),  // wake23
    None,                // wake24
    wired(ports::S, 3),  // wake25
    wired(ports::S, 4),  // wake26
    wired(ports::S, 1),  // wake27
    wired(ports::F, 2),  // wake28
    wired(ports::FF, 0), // wake29
    wired(ports::FF, 4), // wake30
    wired(ports::C, 6),  // wake31
    wired(ports::W, 2),  // wake32
    wired(ports::W, 5),  // wake33
    wired(ports::W, 1),  // wake34
    wired(ports::V, 0),  // wake35
    wired(ports::V, 1),  // wake36
    wired(ports::V, 2),  // wake37
    wired(ports::V, 3),  // wake38
    wired(ports::V, 4),  // wake39
    wired(ports::V, 5),  // wake40
    wired(ports::EE, 0), // wake41
    wired(ports::Z, 1),  // wake42
    wired(ports::Z, 3),  // wake43
    wired(ports::AA, 0), // wake44
    wired(ports::AA, 1), // wake45
    wired(ports::AA, 2), // wake46
    wired(ports::AA, 3), // wake47
    wired(ports::AA, 4), // wake48
    wired(ports::AA, 5), // wake49
    wired(ports::AA, 6), // wake50
    wired(ports::AA, 7), // wake51
    wired(ports::X, 3),  // wake52
    wired(ports::X, 7),  // wake53
    wired(ports::Y, 0),  // wake54
    wired(ports::Y, 1),  // wake55
    wired(ports::Y, 2),  // wake56
    wired(ports::Y, 5),  // wake57
    wired(ports::Y, 6),  // wake58
    wired(ports::L, 1),  // wake59
    wired(ports::L, 3),  // wake60
    wired(ports::L, 4),  // wake61
    wired(ports::L, 5),  // wake62
    wired(ports::I, 4),  // wake63
    wired(ports::I, 6),  // wake64
    wired(ports::Z, 0),  // wake65
    wired(ports::Z, 2),  // wake66
    wired(ports::FF, 1), // wake67
    wired(ports::FF, 2), // wake68
    wired(ports::FF, 3), // wake69
    wired(ports::H, 3),  // wake70
    wired(ports::P, 5),  // wake71
    None,                // wake72
    None,                // wake73
    None,                // wake74
    None,                // wake75
    None,                // wake76
    None,                // wake77
    None,                // wake78
    None,                // wake79
    None,                // wake80
    None,                // wake81
    None,                // wake82
    None,                // wake83
    None,                // wake84
    None,                // wake85
    None,                // wake86
    None,                // wake87
    None,                // wake88
    None,                // wake89
    None,                // wake90
    None,                // wake91
    None,                // wake92
    None,                // wake93
    None,                // wake94
    None,                // wake95
];

/// Returns the wake slot hardwired to `pin`, if any.
///
/// The table is small and this is never on a hot path, so a linear scan is
/// sufficient.
pub fn wake_slot(pin: PinId) -> Option<usize> {
    let slot = WAKE_TABLE.iter().position(|&w| w == Some(pin));
    if let Some(slot) = slot {
        debugln!("wake{} assigned to pin {}", slot, pin.index());
    }
    slot
}
