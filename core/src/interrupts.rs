use bitflags::bitflags;

bitflags! {
    /// The two interrupt sources this core raises. Delivered by setting bits in the
    /// host's IF register and invoking `VideoHost::update_irqs`.
    #[derive(Default)]
    pub struct InterruptFlags: u8 {
        const VBLANK  = 0b0000_0001;
        const LCDSTAT = 0b0000_0010;
    }
}

/// Bit index of each interrupt within the IF/IE registers, per spec §6.
pub const IRQ_VBLANK: u8 = 0;
pub const IRQ_LCDSTAT: u8 = 1;
