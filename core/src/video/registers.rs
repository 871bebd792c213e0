use bitflags::bitflags;

/// Number of bytes in the host's memory-mapped IO array (0xFF00-0xFF7F).
/// `VideoHost::io`/`io_mut` index into an array of this size, offset from 0xFF00,
/// matching the source's `REG_*` offset scheme rather than absolute addresses.
pub const IO_REGISTERS_LEN: usize = 0x80;

pub const REG_LCDC: usize = 0x40;
pub const REG_STAT: usize = 0x41;
pub const REG_SCY: usize = 0x42;
pub const REG_SCX: usize = 0x43;
pub const REG_LY: usize = 0x44;
pub const REG_LYC: usize = 0x45;
pub const REG_DMA: usize = 0x46;
pub const REG_BGP: usize = 0x47;
pub const REG_OBP0: usize = 0x48;
pub const REG_OBP1: usize = 0x49;
pub const REG_WY: usize = 0x4A;
pub const REG_WX: usize = 0x4B;
pub const REG_IF: usize = 0x0F;
pub const REG_HDMA5: usize = 0x55;
pub const REG_BCPS: usize = 0x68;
pub const REG_BCPD: usize = 0x69;
pub const REG_OCPS: usize = 0x6A;
pub const REG_OCPD: usize = 0x6B;

bitflags! {
    /// FF40 - LCD Control.
    ///
    /// Never locked by the PPU, unlike VRAM/OAM: can be written mid-scanline.
    #[derive(Default)]
    pub struct LcdControl: u8 {
        const BG_WINDOW_PRIORITY    = 0b0000_0001;
        const SPRITE_DISPLAY_ENABLE = 0b0000_0010;
        const SPRITE_SIZE           = 0b0000_0100;
        const BG_TILE_MAP_SELECT    = 0b0000_1000;
        const BG_WINDOW_TILE_SELECT = 0b0001_0000;
        const WINDOW_DISPLAY        = 0b0010_0000;
        const WINDOW_MAP_SELECT     = 0b0100_0000;
        const LCD_DISPLAY           = 0b1000_0000;
    }
}

bitflags! {
    /// FF41 - LCD Status. Bits 0-1 mirror the current [`Mode`](super::Mode), bit 2 is the
    /// LYC coincidence flag, bits 3-6 are per-source IRQ enables, bit 7 is unused (reads 1).
    #[derive(Default)]
    pub struct LcdStatus: u8 {
        const MODE_FLAG_0           = 0b0000_0001;
        const MODE_FLAG_1           = 0b0000_0010;
        const COINCIDENCE_FLAG      = 0b0000_0100;
        const MODE_0_H_INTERRUPT    = 0b0000_1000;
        const MODE_1_V_INTERRUPT    = 0b0001_0000;
        const MODE_2_OAM_INTERRUPT  = 0b0010_0000;
        const COINCIDENCE_INTERRUPT = 0b0100_0000;
        const UNUSED                = 0b1000_0000;
    }
}

impl LcdStatus {
    pub fn mode_bits(&self) -> u8 {
        self.bits & 0x3
    }

    pub fn set_mode_bits(&mut self, mode: u8) {
        self.bits = (self.bits & !0x3) | (mode & 0x3);
    }
}
