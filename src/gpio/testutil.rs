//! Shared fixtures for driver tests: heap-backed register windows and mock
//! collaborators recording every call.

use core::ptr;
use core::sync::atomic::{AtomicBool, Ordering};
use std::boxed::Box;
use std::vec::Vec;

use super::regs::ScrAccess;
use super::topology::{pin_address, scr_address, RegWindow};
use super::TegraGpio;
use crate::dev::gpio::{PinId, Pinmux};
use crate::dev::irq::{IrqDiscipline, IrqLines, IrqNumber, LineHandle};
use crate::dev::wakeup::WakeupControl;
use crate::mmio::RegisterWindow;
use crate::sync::IrqSafeSpinLock;
use error::Errno;

// Large enough for the highest port block plus its status bitmap
const MAIN_WINDOW_SIZE: usize = 0x16000;
const AON_WINDOW_SIZE: usize = 0x3000;

// Registry line numbers start past the SPI range the banks themselves use
const LINE_BASE: usize = 32;

pub(crate) fn line_for(pin: PinId) -> LineHandle {
    LineHandle::new(LINE_BASE + pin.index())
}

#[derive(Default)]
pub(crate) struct LineState {
    pub created: Vec<PinId>,
    pub disposed: Vec<LineHandle>,
    pub dispatched: Vec<LineHandle>,
    pub disciplines: Vec<(LineHandle, IrqDiscipline)>,
    pub entered: Vec<IrqNumber>,
    pub exited: Vec<IrqNumber>,
    pub fail_after: Option<usize>,
}

pub(crate) struct MockLines {
    pub state: IrqSafeSpinLock<LineState>,
}

impl MockLines {
    pub fn new() -> Self {
        Self {
            state: IrqSafeSpinLock::new(LineState::default()),
        }
    }
}

impl IrqLines for MockLines {
    fn create_mapping(&self, pin: PinId) -> Result<LineHandle, Errno> {
        let mut state = self.state.lock();
        if state.fail_after == Some(state.created.len()) {
            return Err(Errno::OutOfMemory);
        }
        state.created.push(pin);
        Ok(line_for(pin))
    }

    fn dispose_mapping(&self, line: LineHandle) {
        self.state.lock().disposed.push(line);
    }

    fn find_mapping(&self, pin: PinId) -> Option<LineHandle> {
        Some(line_for(pin))
    }

    fn set_discipline(&self, line: LineHandle, discipline: IrqDiscipline) {
        self.state.lock().disciplines.push((line, discipline));
    }

    fn dispatch(&self, line: LineHandle) {
        self.state.lock().dispatched.push(line);
    }

    fn chained_enter(&self, irq: IrqNumber) {
        self.state.lock().entered.push(irq);
    }

    fn chained_exit(&self, irq: IrqNumber) {
        self.state.lock().exited.push(irq);
    }
}

pub(crate) struct MockPinmux {
    pub requests: IrqSafeSpinLock<Vec<PinId>>,
    pub frees: IrqSafeSpinLock<Vec<PinId>>,
    pub directions: IrqSafeSpinLock<Vec<(PinId, bool)>>,
    pub fail: AtomicBool,
}

impl MockPinmux {
    pub fn new() -> Self {
        Self {
            requests: IrqSafeSpinLock::new(Vec::new()),
            frees: IrqSafeSpinLock::new(Vec::new()),
            directions: IrqSafeSpinLock::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }
}

impl Pinmux for MockPinmux {
    fn request(&self, pin: PinId) -> Result<(), Errno> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(Errno::DeviceError);
        }
        self.requests.lock().push(pin);
        Ok(())
    }

    fn free(&self, pin: PinId) {
        self.frees.lock().push(pin);
    }

    fn set_direction(&self, pin: PinId, input: bool) -> Result<(), Errno> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(Errno::DeviceError);
        }
        self.directions.lock().push((pin, input));
        Ok(())
    }
}

pub(crate) struct MockWakeup {
    pub types: IrqSafeSpinLock<Vec<(usize, crate::dev::irq::IrqTrigger)>>,
    pub enables: IrqSafeSpinLock<Vec<(usize, bool)>>,
    pub fail: AtomicBool,
}

impl MockWakeup {
    pub fn new() -> Self {
        Self {
            types: IrqSafeSpinLock::new(Vec::new()),
            enables: IrqSafeSpinLock::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }
}

impl WakeupControl for MockWakeup {
    fn set_wake_type(&self, slot: usize, trigger: crate::dev::irq::IrqTrigger) -> Result<(), Errno> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(Errno::DeviceError);
        }
        self.types.lock().push((slot, trigger));
        Ok(())
    }

    fn set_wake_enabled(&self, slot: usize, enabled: bool) -> Result<(), Errno> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(Errno::DeviceError);
        }
        self.enables.lock().push((slot, enabled));
        Ok(())
    }
}

/// Fake controller complex: two heap-backed register windows plus recording
/// mocks for every collaborator.
pub(crate) struct Harness {
    main: *mut u32,
    aon: *mut u32,
    pub lines: MockLines,
    pub pinmux: MockPinmux,
    pub wakeup: MockWakeup,
}

pub(crate) const BANK_IRQS: [IrqNumber; 7] = [
    IrqNumber::new(40),
    IrqNumber::new(41),
    IrqNumber::new(42),
    IrqNumber::new(43),
    IrqNumber::new(44),
    IrqNumber::new(45),
    IrqNumber::new(46),
];

impl Harness {
    pub fn new() -> Self {
        Self {
            main: Box::leak(vec![0u32; MAIN_WINDOW_SIZE / 4].into_boxed_slice()).as_mut_ptr(),
            aon: Box::leak(vec![0u32; AON_WINDOW_SIZE / 4].into_boxed_slice()).as_mut_ptr(),
            lines: MockLines::new(),
            pinmux: MockPinmux::new(),
            wakeup: MockWakeup::new(),
        }
    }

    pub fn driver(&self) -> TegraGpio<'_> {
        self.driver_with_irqs(&BANK_IRQS).unwrap()
    }

    pub fn driver_with_irqs(&self, irqs: &[IrqNumber]) -> Result<TegraGpio<'_>, Errno> {
        let windows = unsafe {
            [
                RegisterWindow::new("gpio-main", self.main as usize, MAIN_WINDOW_SIZE),
                RegisterWindow::new("gpio-aon", self.aon as usize, AON_WINDOW_SIZE),
            ]
        };
        TegraGpio::new(windows, irqs, &self.lines, &self.pinmux, &self.wakeup)
    }

    fn buffer(&self, window: RegWindow) -> *mut u32 {
        match window {
            RegWindow::Main => self.main,
            RegWindow::Aon => self.aon,
        }
    }

    pub fn peek(&self, window: RegWindow, addr: u32) -> u32 {
        unsafe { ptr::read_volatile(self.buffer(window).add(addr as usize / 4)) }
    }

    pub fn poke(&self, window: RegWindow, addr: u32, value: u32) {
        unsafe { ptr::write_volatile(self.buffer(window).add(addr as usize / 4), value) }
    }

    /// Raw value of one of `pin`'s general registers
    pub fn pin_reg(&self, pin: PinId, reg: u32) -> u32 {
        let (window, addr) = pin_address(pin, reg);
        self.peek(window, addr)
    }

    /// Overwrites one of `pin`'s general registers behind the driver's back
    pub fn set_pin_reg(&self, pin: PinId, reg: u32, value: u32) {
        let (window, addr) = pin_address(pin, reg);
        self.poke(window, addr, value);
    }

    /// Grants this domain full access to `pin`
    pub fn grant(&self, pin: PinId) {
        self.grant_bits(pin, ScrAccess::FULL_ACCESS.bits());
    }

    /// Writes an arbitrary capability set into `pin`'s security register
    pub fn grant_bits(&self, pin: PinId, bits: u32) {
        let (window, addr) = scr_address(pin);
        self.poke(window, addr, bits);
    }
}
