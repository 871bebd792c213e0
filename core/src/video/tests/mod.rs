// Scenario tests driving `VideoCore` the way a CPU loop would: a harness
// `VideoHost` plus repeated `process_events` calls of small cycle counts.

use crate::interrupts::InterruptFlags;
use crate::model::GameModel;
use crate::video::registers::{IO_REGISTERS_LEN, REG_LCDC, REG_LY, REG_LYC, REG_SCX, REG_STAT};
use crate::video::renderer::DummyRenderer;
use crate::video::{VideoCore, VideoHost};

mod scenario_frame_timing;
mod scenario_oam_and_draw;
mod scenario_stat_irq;

pub(super) struct HarnessHost {
    io: [u8; IO_REGISTERS_LEN],
    cycles: i32,
    double_speed: u32,
    model: GameModel,
    pub raised: Vec<InterruptFlags>,
    pub frames_posted: u32,
    pub frame_ended_count: u32,
    pub thread_frame_ended_count: u32,
}

impl HarnessHost {
    pub fn new(model: GameModel) -> Self {
        HarnessHost {
            io: [0; IO_REGISTERS_LEN],
            cycles: 0,
            double_speed: 0,
            model,
            raised: Vec::new(),
            frames_posted: 0,
            frame_ended_count: 0,
            thread_frame_ended_count: 0,
        }
    }

    pub fn set_lcdc(&mut self, value: u8) {
        self.io[REG_LCDC] = value;
    }

    pub fn set_scx(&mut self, value: u8) {
        self.io[REG_SCX] = value;
    }

    pub fn set_lyc(&mut self, value: u8) {
        self.io[REG_LYC] = value;
    }

    pub fn stat(&self) -> u8 {
        self.io[REG_STAT]
    }

    pub fn ly(&self) -> u8 {
        self.io[REG_LY]
    }

    /// Advance the fake CPU clock by `cycles` and run the core through them.
    pub fn tick(&mut self, core: &mut VideoCore, cycles: i32) {
        self.cycles += cycles;
        core.process_events(self, cycles);
    }
}

impl VideoHost for HarnessHost {
    fn model(&self) -> GameModel {
        self.model
    }

    fn io(&self) -> &[u8; IO_REGISTERS_LEN] {
        &self.io
    }

    fn io_mut(&mut self) -> &mut [u8; IO_REGISTERS_LEN] {
        &mut self.io
    }

    fn cpu_cycles(&self) -> i32 {
        self.cycles
    }

    fn double_speed(&self) -> u32 {
        self.double_speed
    }

    fn at_instruction_boundary(&self) -> bool {
        true
    }

    fn cycles_until_next_fetch(&self) -> i32 {
        0
    }

    fn raise_interrupt(&mut self, flag: InterruptFlags) {
        self.raised.push(flag);
    }

    fn update_irqs(&mut self) {}

    fn lower_next_event(&mut self, _cycles: i32) {}

    fn hdma_active(&self) -> bool {
        false
    }

    fn kick_hdma(&mut self) {}

    fn post_video_frame(&mut self, _pixels: &[u8]) {
        self.frames_posted += 1;
    }

    fn frame_ended(&mut self) {
        self.frame_ended_count += 1;
    }

    fn thread_frame_ended(&mut self) {
        self.thread_frame_ended_count += 1;
    }
}

/// Build a core and host pair, then turn the LCD on the same way `write_lcdc`
/// would from a real boot ROM handoff (LCDC=0x91: display, BG, OBJ, window
/// tile data at 0x8000).
pub(super) fn powered_on(model: GameModel) -> (VideoCore, HarnessHost) {
    let mut core = VideoCore::new(model, Box::new(DummyRenderer::new()));
    let mut host = HarnessHost::new(model);
    core.write_lcdc(&mut host, 0x91);
    (core, host)
}
