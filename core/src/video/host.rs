use crate::interrupts::InterruptFlags;
use crate::model::GameModel;
use crate::video::registers::IO_REGISTERS_LEN;

/// The emulator-side collaborator `VideoCore` calls back into, mirroring the
/// narrow surface `MemoryMapper` exposes to the teacher's PPU rather than
/// giving the video core ownership of the CPU/scheduler/cartridge (Design
/// Notes §9). A harness wires this up once and hands `VideoCore` a `&mut dyn
/// VideoHost` for the duration of `process_events`.
pub trait VideoHost {
    fn model(&self) -> GameModel;

    /// Raw view of the 0xFF00-0xFF7F IO register window, indexed by the
    /// `REG_*` offsets in [`crate::video::registers`].
    fn io(&self) -> &[u8; IO_REGISTERS_LEN];

    fn io_mut(&mut self) -> &mut [u8; IO_REGISTERS_LEN];

    /// Total CPU cycles elapsed since reset, at single-speed granularity.
    fn cpu_cycles(&self) -> i32;

    /// `1` in CGB double-speed mode, `0` otherwise. Several of the source's
    /// formulas shift by this rather than branching.
    fn double_speed(&self) -> u32;

    /// True only when the CPU is about to fetch its next opcode; frame-end
    /// delivery is deferred to this boundary (spec §4.3).
    fn at_instruction_boundary(&self) -> bool;

    /// When not at an instruction boundary, how many cycles until the next
    /// fetch. The host alone knows its own execution-state phase; this keeps
    /// that detail out of `VideoCore`.
    fn cycles_until_next_fetch(&self) -> i32;

    fn raise_interrupt(&mut self, flag: InterruptFlags);

    /// Let the host re-evaluate its own scheduling now that an interrupt line
    /// may have changed, mirroring `updateIRQs`.
    fn update_irqs(&mut self);

    /// Lower the host's own next-wakeup deadline if `cycles` from now is sooner,
    /// mirroring the write to `cpu->nextEvent` on LCD power-on.
    fn lower_next_event(&mut self, cycles: i32);

    /// Whether an HDMA transfer is armed (`HDMA5` bit 7 clear after a GDMA/HDMA
    /// setup write). Consulted only to decide whether entering H-Blank should
    /// kick off an HDMA burst.
    fn hdma_active(&self) -> bool;

    /// Arm an HDMA burst of 16 bytes, to run starting at the current cycle count.
    fn kick_hdma(&mut self);

    /// Sample accelerometer/tilt input for cartridges with a motion sensor
    /// (MBC7 and similar), called once per VBlank wrap.
    fn sample_cartridge_rotation(&mut self) {}

    /// Hand a completed frame's pixels to any attached video stream sink.
    fn post_video_frame(&mut self, _pixels: &[u8]) {}

    /// Notify a frontend thread that a frame boundary was reached, honoring
    /// frame-skip.
    fn sync_post_frame(&mut self) {}

    fn thread_frame_started(&mut self) {}

    /// Notify the host that a frame has fully elapsed, mirroring `GBFrameEnded`.
    /// Raised once per frame from the aligned branch of the frame-tick check,
    /// independent of frame-skip.
    fn frame_ended(&mut self) {}

    /// Notify a frontend thread that a frame has ended, mirroring
    /// `mCoreThreadFrameEnded`. Raised at the moment VBlank begins rather
    /// than at the frame-tick boundary.
    fn thread_frame_ended(&mut self) {}
}
