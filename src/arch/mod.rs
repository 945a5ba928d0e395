//! Architecture-specific interrupt-state control backing [crate::sync]

cfg_if! {
    if #[cfg(all(target_arch = "aarch64", not(test)))] {
        use cortex_a::registers::DAIF;
        use tock_registers::interfaces::{Readable, Writeable};

        /// Masks IRQs on the local core and returns previous IRQ mask state
        ///
        /// # Safety
        ///
        /// Unsafe: disables IRQ handling temporarily
        #[inline(always)]
        pub unsafe fn irq_mask_save() -> u64 {
            let state = DAIF.get();
            core::arch::asm!("msr daifset, #2", options(nomem, nostack, preserves_flags));
            state
        }

        /// Restores IRQ mask state returned by [irq_mask_save]
        ///
        /// # Safety
        ///
        /// Unsafe: modifies interrupt behavior
        #[inline(always)]
        pub unsafe fn irq_restore(state: u64) {
            DAIF.set(state);
        }
    } else {
        /// Masks IRQs on the local core and returns previous IRQ mask state
        ///
        /// # Safety
        ///
        /// No-op stub for non-target builds (host-side unit tests)
        #[inline(always)]
        pub unsafe fn irq_mask_save() -> u64 {
            0
        }

        /// Restores IRQ mask state returned by [irq_mask_save]
        ///
        /// # Safety
        ///
        /// No-op stub for non-target builds (host-side unit tests)
        #[inline(always)]
        pub unsafe fn irq_restore(_state: u64) {}
    }
}
