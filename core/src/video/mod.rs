//! The LCD video timing core: mode state machine, register codecs, OAM scan,
//! and palette engine (spec §4).

pub mod host;
pub mod oam;
pub mod palette;
pub mod registers;
pub mod renderer;
pub mod serialize;
#[cfg(test)]
mod tests;
pub mod vram;

use tinyvec::ArrayVec;

use crate::interrupts::InterruptFlags;
use crate::model::GameModel;
use oam::{scan_oam, Oam, SpriteEntry, MAX_SPRITES_PER_LINE};
use palette::{decode_dmg_palette, read_color_ram_byte, write_color_ram_byte, PaletteCursor, BG_PALETTE_BASE, OBJ_PALETTE_BASE, PALETTE_SIZE};
use registers::{LcdControl, LcdStatus, REG_HDMA5, REG_LCDC, REG_LY, REG_LYC, REG_SCX, REG_STAT};
use renderer::{DummyRenderer, Renderer};
use vram::Vram;

pub use host::VideoHost;

/// Dots per scanline.
pub const HORIZ_LEN: i32 = 456;
/// Dots per frame.
pub const TOTAL_LEN: i32 = 70224;
/// Visible scanlines.
pub const VPIX: i32 = 144;
/// Last scanline index (0-based).
pub const VTOTAL: i32 = 153;
pub const MODE2_LEN: i32 = 80;
pub const MODE3_LEN_BASE: i32 = 172;
pub const MODE0_LEN_BASE: i32 = 204;

/// LCD mode, doubling as the 2-bit value mirrored in `STAT` bits 0-1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Draw = 3,
}

impl Mode {
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// The LCD video timing core. Owns VRAM, OAM, palette RAM and the scalar
/// dot-clock scheduler; drives a pluggable [`Renderer`] and calls back into a
/// [`VideoHost`] for everything owned by the rest of the system (spec §3, §4).
pub struct VideoCore {
    model: GameModel,
    renderer: Box<dyn Renderer>,

    vram: Vram,
    oam: Oam,
    palette: [u16; PALETTE_SIZE],
    bcp_cursor: PaletteCursor,
    ocp_cursor: PaletteCursor,

    mode: Mode,
    stat: LcdStatus,
    ly: i32,
    x: i32,

    next_event: i32,
    event_diff: i32,
    next_mode: i32,
    next_frame: i32,
    dot_counter: i32,

    frame_counter: u64,
    frameskip: i32,
    frameskip_counter: i32,

    obj_this_line: ArrayVec<[SpriteEntry; MAX_SPRITES_PER_LINE]>,
}

impl VideoCore {
    pub fn new(model: GameModel, renderer: Box<dyn Renderer>) -> Self {
        let mut core = VideoCore {
            model,
            renderer,
            vram: Vram::default(),
            oam: Oam::default(),
            palette: [0; PALETTE_SIZE],
            bcp_cursor: PaletteCursor::default(),
            ocp_cursor: PaletteCursor::default(),
            mode: Mode::VBlank,
            stat: LcdStatus::default(),
            ly: 0,
            x: 0,
            next_event: i32::MAX,
            event_diff: 0,
            next_mode: i32::MAX,
            next_frame: i32::MAX,
            dot_counter: i32::MIN,
            frame_counter: 0,
            frameskip: 0,
            frameskip_counter: 0,
            obj_this_line: ArrayVec::new(),
        };
        core.reset();
        core
    }

    pub fn with_dummy_renderer(model: GameModel) -> Self {
        Self::new(model, Box::new(DummyRenderer::new()))
    }

    pub fn from_config(config: crate::config::VideoCoreConfig, renderer: Box<dyn Renderer>) -> Self {
        let mut core = Self::new(config.model, renderer);
        core.set_frameskip(config.frameskip);
        core
    }

    /// `GBVideoReset`.
    pub fn reset(&mut self) {
        self.vram = Vram::default();
        self.oam = Oam::default();
        self.vram.switch_bank(0);

        self.mode = Mode::VBlank;
        self.stat = LcdStatus::default();
        self.stat.set_mode_bits(self.mode.bits());
        self.ly = 0;
        self.x = 0;

        self.next_event = i32::MAX;
        self.event_diff = 0;
        self.next_mode = i32::MAX;
        self.dot_counter = i32::MIN;
        self.next_frame = i32::MAX;

        self.frame_counter = 0;
        self.frameskip_counter = self.frameskip;

        self.obj_this_line = ArrayVec::new();

        self.renderer.deinit();
        self.renderer.init(self.model);
    }

    pub fn deinit(&mut self) {
        self.renderer.deinit();
    }

    /// `GBVideoAssociateRenderer`: hand the outgoing renderer's tile cache to the
    /// incoming one before swapping.
    pub fn associate_renderer(&mut self, mut renderer: Box<dyn Renderer>) {
        self.renderer.deinit();
        if let Some(cache) = self.renderer.take_tile_cache() {
            renderer.give_tile_cache(cache);
        }
        renderer.init(self.model);
        self.renderer = renderer;
    }

    pub fn set_frameskip(&mut self, frameskip: u8) {
        self.frameskip = frameskip as i32;
        self.frameskip_counter = self.frameskip;
    }

    /// Runtime model switch. Only affects the renderer's own notion of the
    /// active model (picked up on its next `init`); register-writer behavior
    /// that branches on model (e.g. [`write_stat`](Self::write_stat)'s DMG
    /// quirk) reads it from [`VideoHost::model`] instead, since that is the
    /// side the rest of the system keeps authoritative.
    pub fn set_model(&mut self, model: GameModel) {
        self.model = model;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn ly(&self) -> u8 {
        self.ly as u8
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn vram(&self) -> &Vram {
        &self.vram
    }

    pub fn oam(&self) -> &Oam {
        &self.oam
    }

    pub fn palette(&self) -> &[u16; PALETTE_SIZE] {
        &self.palette
    }

    // ---- the dot-clock event loop (spec §4.1/§4.2) ----

    /// `GBVideoProcessEvents`. Advance by `cycles` and return the number of
    /// cycles until the next event is due.
    pub fn process_events(&mut self, host: &mut dyn VideoHost, cycles: i32) -> i32 {
        self.event_diff += cycles;
        if self.next_event != i32::MAX {
            self.next_event -= cycles;
        }

        if self.next_event <= 0 {
            if self.next_mode != i32::MAX {
                self.next_mode -= self.event_diff;
            }
            if self.next_frame != i32::MAX {
                self.next_frame -= self.event_diff;
            }
            self.next_event = i32::MAX;

            self.process_dots(host);

            if self.next_mode <= 0 {
                self.transition_mode(host);
            }
            if self.next_frame <= 0 {
                self.tick_frame(host);
            }

            if self.next_mode < self.next_event {
                self.next_event = self.next_mode;
            }
            self.event_diff = 0;
        }

        self.next_event
    }

    /// `GBVideoProcessDots`: resolve how far across the 160-dot scanline the
    /// renderer has progressed and hand it the newly-valid range.
    fn process_dots(&mut self, host: &dyn VideoHost) {
        if self.mode != Mode::Draw || self.dot_counter < 0 {
            return;
        }

        let old_x = self.x;
        let mut new_x = self.dot_counter + self.event_diff + (host.cpu_cycles() >> host.double_speed());
        if new_x > 160 {
            new_x = 160;
        }
        if new_x < 0 {
            log::error!("video dot clock went negative");
            new_x = old_x;
        }
        if new_x == 160 {
            self.dot_counter = i32::MIN;
        }

        if self.frameskip_counter <= 0 {
            self.renderer.draw_range(old_x as u8, new_x as u8, self.ly as u8, &self.obj_this_line);
        }
        self.x = new_x;
    }

    fn transition_mode(&mut self, host: &mut dyn VideoHost) {
        match self.mode {
            Mode::HBlank => self.transition_from_hblank(host),
            Mode::VBlank => self.transition_from_vblank(host),
            Mode::OamScan => self.transition_from_oam(host),
            Mode::Draw => self.transition_from_draw(host),
        }
        self.stat.set_mode_bits(self.mode.bits());
        host.io_mut()[REG_STAT] = self.stat.bits();
    }

    fn transition_from_hblank(&mut self, host: &mut dyn VideoHost) {
        if self.frameskip_counter <= 0 {
            self.renderer.finish_scanline(self.ly as u8);
        }
        self.ly += 1;
        host.io_mut()[REG_LY] = self.ly as u8;

        if self.ly < VPIX {
            let scx = host.io()[REG_SCX];
            self.next_mode = MODE2_LEN + (scx & 7) as i32;
            self.mode = Mode::OamScan;
            if self.stat.contains(LcdStatus::MODE_2_OAM_INTERRUPT) && !self.stat.contains(LcdStatus::MODE_0_H_INTERRUPT) {
                self.raise_stat_irq(host);
            }
        } else {
            self.next_mode = HORIZ_LEN;
            self.mode = Mode::VBlank;
            self.next_frame = 0;
            host.raise_interrupt(InterruptFlags::VBLANK);
            host.update_irqs();
            host.thread_frame_ended();
            if self.stat.contains(LcdStatus::MODE_1_V_INTERRUPT) {
                self.raise_stat_irq(host);
            }
        }
        self.update_lyc_and_irq(host);
    }

    fn transition_from_vblank(&mut self, host: &mut dyn VideoHost) {
        self.ly += 1;

        if self.ly == VTOTAL + 1 {
            self.ly = 0;
            host.io_mut()[REG_LY] = 0;
            let scx = host.io()[REG_SCX];
            self.next_mode = MODE2_LEN + (scx & 7) as i32;
            self.mode = Mode::OamScan;
            if self.stat.contains(LcdStatus::MODE_2_OAM_INTERRUPT) {
                self.raise_stat_irq(host);
            }
            self.renderer.finish_frame();
            host.sample_cartridge_rotation();
            return;
        } else if self.ly == VTOTAL {
            host.io_mut()[REG_LY] = 0;
            self.next_mode = HORIZ_LEN - 8;
        } else if self.ly == VTOTAL - 1 {
            host.io_mut()[REG_LY] = self.ly as u8;
            self.next_mode = 8;
        } else {
            host.io_mut()[REG_LY] = self.ly as u8;
            self.next_mode = HORIZ_LEN;
        }
        self.update_lyc_and_irq(host);
    }

    fn transition_from_oam(&mut self, host: &mut dyn VideoHost) {
        let lcdc = LcdControl::from_bits_truncate(host.io()[REG_LCDC]);
        self.obj_this_line = scan_oam(&self.oam, self.ly as u8, lcdc.contains(LcdControl::SPRITE_SIZE));

        self.dot_counter = 0;
        self.next_event = HORIZ_LEN;
        self.x = 0;

        let scx = host.io()[REG_SCX];
        self.next_mode = MODE3_LEN_BASE + self.obj_this_line.len() as i32 * 11 - (scx & 7) as i32;
        self.mode = Mode::Draw;
    }

    fn transition_from_draw(&mut self, host: &mut dyn VideoHost) {
        self.next_mode = MODE0_LEN_BASE - self.obj_this_line.len() as i32 * 11;
        self.mode = Mode::HBlank;

        if self.stat.contains(LcdStatus::MODE_0_H_INTERRUPT) {
            self.raise_stat_irq(host);
        }
        if self.ly < VPIX && host.hdma_active() && host.io()[REG_HDMA5] != 0xFF {
            host.kick_hdma();
        }
    }

    fn tick_frame(&mut self, host: &mut dyn VideoHost) {
        if host.at_instruction_boundary() {
            self.next_frame = TOTAL_LEN;
            self.next_event = TOTAL_LEN;
            host.frame_ended();

            self.frameskip_counter -= 1;
            if self.frameskip_counter < 0 {
                host.sync_post_frame();
                self.frameskip_counter = self.frameskip;
            }
            self.frame_counter = self.frame_counter.wrapping_add(1);

            if let Some(pixels) = self.renderer.get_pixels() {
                host.post_video_frame(pixels);
            }
            host.thread_frame_started();
        } else {
            self.next_frame = host.cycles_until_next_fetch();
            if self.next_frame < self.next_event {
                self.next_event = self.next_frame;
            }
        }
    }

    fn raise_stat_irq(&self, host: &mut dyn VideoHost) {
        host.raise_interrupt(InterruptFlags::LCDSTAT);
        host.update_irqs();
    }

    fn update_lyc_and_irq(&mut self, host: &mut dyn VideoHost) {
        let ly = host.io()[REG_LY];
        let lyc = host.io()[REG_LYC];
        if ly == lyc {
            self.stat.insert(LcdStatus::COINCIDENCE_FLAG);
            if self.stat.contains(LcdStatus::COINCIDENCE_INTERRUPT) {
                self.raise_stat_irq(host);
            }
        } else {
            self.stat.remove(LcdStatus::COINCIDENCE_FLAG);
        }
    }

    // ---- register writes (spec §4.5) ----

    /// `GBVideoWriteLCDC`.
    pub fn write_lcdc(&mut self, host: &mut dyn VideoHost, value: u8) {
        let was_on = LcdControl::from_bits_truncate(host.io()[REG_LCDC]).contains(LcdControl::LCD_DISPLAY);
        let now_on = LcdControl::from_bits_truncate(value).contains(LcdControl::LCD_DISPLAY);
        host.io_mut()[REG_LCDC] = value;

        if !was_on && now_on {
            self.mode = Mode::OamScan;
            self.next_mode = MODE2_LEN - 5;
            self.next_event = self.next_mode;
            self.event_diff = (-host.cpu_cycles()) >> host.double_speed();
            self.ly = 0;
            host.io_mut()[REG_LY] = 0;

            self.stat.set_mode_bits(self.mode.bits());
            self.update_lyc_and_irq(host);
            host.io_mut()[REG_STAT] = self.stat.bits();

            host.lower_next_event(self.next_event << host.double_speed());
        } else if was_on && !now_on {
            self.mode = Mode::HBlank;
            self.next_mode = i32::MAX;
            self.next_event = self.next_frame;
            self.stat.set_mode_bits(self.mode.bits());
            host.io_mut()[REG_STAT] = self.stat.bits();
            self.ly = 0;
            host.io_mut()[REG_LY] = 0;
        }
    }

    /// `GBVideoWriteSTAT`: the writable bits are 3-6, bits 0-2 are read-only mode/coincidence.
    pub fn write_stat(&mut self, host: &mut dyn VideoHost, value: u8) {
        let preserved = self.stat.bits() & 0x07;
        self.stat = LcdStatus::from_bits_truncate(preserved | (value & 0x78));

        if host.model() == GameModel::Dmg && self.mode == Mode::VBlank {
            self.raise_stat_irq(host);
        }
        host.io_mut()[REG_STAT] = self.stat.bits();
    }

    /// `GBVideoWriteLYC`: only re-evaluates the coincidence flag while still in OAM search.
    pub fn write_lyc(&mut self, host: &mut dyn VideoHost, value: u8) {
        host.io_mut()[REG_LYC] = value;
        if self.mode != Mode::OamScan {
            return;
        }
        let ly = host.io()[REG_LY];
        if ly == value {
            self.stat.insert(LcdStatus::COINCIDENCE_FLAG);
            if self.stat.contains(LcdStatus::COINCIDENCE_INTERRUPT) {
                self.raise_stat_irq(host);
            }
        } else {
            self.stat.remove(LcdStatus::COINCIDENCE_FLAG);
        }
        host.io_mut()[REG_STAT] = self.stat.bits();
    }

    /// `GBVideoWritePalette` (DMG branch), `BGP`.
    pub fn write_bgp(&mut self, value: u8) {
        self.write_dmg_palette_register(BG_PALETTE_BASE, value);
    }

    pub fn write_obp0(&mut self, value: u8) {
        self.write_dmg_palette_register(OBJ_PALETTE_BASE, value);
    }

    pub fn write_obp1(&mut self, value: u8) {
        self.write_dmg_palette_register(OBJ_PALETTE_BASE + 4, value);
    }

    fn write_dmg_palette_register(&mut self, base: usize, value: u8) {
        for (i, color) in decode_dmg_palette(value).iter().enumerate() {
            self.palette[base + i] = *color;
            self.renderer.write_palette(base + i, *color);
        }
    }

    /// `GBVideoWritePalette` (CGB branch), `BCPS`.
    pub fn write_bcps(&mut self, value: u8) {
        self.bcp_cursor.write_status(value);
    }

    pub fn read_bcps(&self) -> u8 {
        self.bcp_cursor.status_byte()
    }

    pub fn write_bcpd(&mut self, value: u8) {
        self.write_cgb_color_byte(BG_PALETTE_BASE, value, true);
    }

    pub fn read_bcpd(&self) -> u8 {
        let word = self.palette[BG_PALETTE_BASE + self.bcp_cursor.color_word_index()];
        read_color_ram_byte(word, self.bcp_cursor.index)
    }

    pub fn write_ocps(&mut self, value: u8) {
        self.ocp_cursor.write_status(value);
    }

    pub fn read_ocps(&self) -> u8 {
        self.ocp_cursor.status_byte()
    }

    pub fn write_ocpd(&mut self, value: u8) {
        self.write_cgb_color_byte(OBJ_PALETTE_BASE, value, false);
    }

    pub fn read_ocpd(&self) -> u8 {
        let word = self.palette[OBJ_PALETTE_BASE + self.ocp_cursor.color_word_index()];
        read_color_ram_byte(word, self.ocp_cursor.index)
    }

    fn write_cgb_color_byte(&mut self, base: usize, value: u8, is_bg: bool) {
        let cursor = if is_bg { &mut self.bcp_cursor } else { &mut self.ocp_cursor };
        let word_index = base + cursor.color_word_index();
        write_color_ram_byte(&mut self.palette[word_index], cursor.index, value);
        let color = self.palette[word_index];
        self.renderer.write_palette(word_index, color);
        cursor.advance();
    }

    /// `GBVideoSwitchBank`.
    pub fn switch_bank(&mut self, value: u8) {
        self.vram.switch_bank(value);
    }

    // ---- VRAM / OAM access, gated by mode (spec §4.1 invariants) ----

    pub fn can_access_vram(&self) -> bool {
        self.mode != Mode::Draw
    }

    pub fn can_access_oam(&self) -> bool {
        self.mode != Mode::OamScan && self.mode != Mode::Draw
    }

    pub fn read_vram(&self, address: u16) -> u8 {
        self.vram.active_bank()[address as usize]
    }

    pub fn write_vram(&mut self, address: u16, value: u8) {
        self.vram.active_bank_mut()[address as usize] = value;
        let absolute = self.vram.current_bank() as u16 * vram::VRAM_BANK_SIZE as u16 + address;
        self.renderer.write_vram(absolute, value);
    }

    pub fn read_oam(&self, address: u16) -> u8 {
        self.oam.read_byte(address)
    }

    pub fn write_oam(&mut self, address: u16, value: u8) {
        self.oam.write_byte(address, value);
    }
}
