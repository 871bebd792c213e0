//! Fixed-layout binary snapshot format (spec §4.7), mirroring `GBVideoSerialize`/
//! `GBVideoDeserialize` field-for-field so snapshots are portable across hosts.

use std::convert::TryInto;
use std::fmt;

use crate::video::oam::{scan_oam, MAX_SPRITES_PER_LINE, OAM_SIZE};
use crate::video::palette::PALETTE_SIZE;
use crate::video::registers::LcdControl;
use crate::video::registers::REG_LCDC;
use crate::video::vram::VRAM_SIZE;
use crate::video::{Mode, VideoCore, VideoHost};

/// `x`(2) + `ly`(2) + 4×i32 scheduler scalars(16) + frame counter(4) + vram bank(1)
/// + flags(1) + bcp/ocp index(4) + palette(128) + vram(16384) + oam(160).
pub const SNAPSHOT_LEN: usize = 2 + 2 + 16 + 4 + 1 + 1 + 4 + PALETTE_SIZE * 2 + VRAM_SIZE + OAM_SIZE;

const BCP_INCREMENT_BIT: u8 = 0b0000_0001;
const OCP_INCREMENT_BIT: u8 = 0b0000_0010;
const MODE_SHIFT: u8 = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The buffer handed to `load_snapshot` is shorter than [`SNAPSHOT_LEN`].
    ShortBuffer { expected: usize, found: usize },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::ShortBuffer { expected, found } => {
                write!(f, "video snapshot truncated: expected {} bytes, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

fn mode_from_bits(bits: u8) -> Mode {
    match bits & 0x3 {
        0 => Mode::HBlank,
        1 => Mode::VBlank,
        2 => Mode::OamScan,
        _ => Mode::Draw,
    }
}

impl VideoCore {
    /// `GBVideoSerialize`.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SNAPSHOT_LEN);

        out.extend_from_slice(&(self.x as u16).to_le_bytes());
        out.extend_from_slice(&(self.ly as u16).to_le_bytes());
        out.extend_from_slice(&self.next_event.to_le_bytes());
        out.extend_from_slice(&self.event_diff.to_le_bytes());
        out.extend_from_slice(&self.next_mode.to_le_bytes());
        out.extend_from_slice(&self.dot_counter.to_le_bytes());
        out.extend_from_slice(&(self.frame_counter as u32).to_le_bytes());
        out.push(self.vram.current_bank());

        let mut flags = self.mode.bits() << MODE_SHIFT;
        if self.bcp_cursor.auto_increment {
            flags |= BCP_INCREMENT_BIT;
        }
        if self.ocp_cursor.auto_increment {
            flags |= OCP_INCREMENT_BIT;
        }
        out.push(flags);

        out.extend_from_slice(&(self.bcp_cursor.index as u16).to_le_bytes());
        out.extend_from_slice(&(self.ocp_cursor.index as u16).to_le_bytes());

        for color in self.palette.iter() {
            out.extend_from_slice(&color.to_le_bytes());
        }
        out.extend_from_slice(self.vram.raw());
        out.extend_from_slice(self.oam.raw());

        debug_assert_eq!(out.len(), SNAPSHOT_LEN);
        out
    }

    /// `GBVideoDeserialize`. Restores scheduler state, memory, and palette RAM,
    /// then rebuilds anything derived: the renderer's palette cache, the
    /// current VRAM bank view, and the current scanline's sprite selection.
    pub fn load_snapshot(&mut self, host: &dyn VideoHost, bytes: &[u8]) -> Result<(), SnapshotError> {
        if bytes.len() < SNAPSHOT_LEN {
            return Err(SnapshotError::ShortBuffer {
                expected: SNAPSHOT_LEN,
                found: bytes.len(),
            });
        }

        let mut cursor = 0usize;
        let mut take = |n: usize| {
            let slice = &bytes[cursor..cursor + n];
            cursor += n;
            slice
        };

        self.x = u16::from_le_bytes(take(2).try_into().unwrap()) as i32;
        self.ly = u16::from_le_bytes(take(2).try_into().unwrap()) as i32;
        self.next_event = i32::from_le_bytes(take(4).try_into().unwrap());
        self.event_diff = i32::from_le_bytes(take(4).try_into().unwrap());
        self.next_mode = i32::from_le_bytes(take(4).try_into().unwrap());
        self.dot_counter = i32::from_le_bytes(take(4).try_into().unwrap());
        self.frame_counter = u32::from_le_bytes(take(4).try_into().unwrap()) as u64;

        let vram_bank = take(1)[0];

        let flags = take(1)[0];
        self.mode = mode_from_bits(flags >> MODE_SHIFT);
        self.bcp_cursor.auto_increment = flags & BCP_INCREMENT_BIT != 0;
        self.ocp_cursor.auto_increment = flags & OCP_INCREMENT_BIT != 0;

        self.bcp_cursor.index = u16::from_le_bytes(take(2).try_into().unwrap()) as u8 & 0x3F;
        self.ocp_cursor.index = u16::from_le_bytes(take(2).try_into().unwrap()) as u8 & 0x3F;

        for slot in self.palette.iter_mut() {
            *slot = u16::from_le_bytes(take(2).try_into().unwrap());
        }
        self.vram.raw_mut().copy_from_slice(take(VRAM_SIZE));
        self.oam.raw_mut().copy_from_slice(take(OAM_SIZE));

        self.stat.set_mode_bits(self.mode.bits());

        for (i, color) in self.palette.iter().enumerate() {
            self.renderer.write_palette(i, *color);
        }

        let tall_sprites = LcdControl::from_bits_truncate(host.io()[REG_LCDC]).contains(LcdControl::SPRITE_SIZE);
        self.obj_this_line = scan_oam(&self.oam, self.ly as u8, tall_sprites);
        debug_assert!(self.obj_this_line.len() <= MAX_SPRITES_PER_LINE);

        self.vram.switch_bank(vram_bank);

        Ok(())
    }
}
