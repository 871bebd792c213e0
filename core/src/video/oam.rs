use bitflags::bitflags;
use tinyvec::ArrayVec;

pub const OAM_SIZE: usize = 160;
pub const OAM_ENTRY_COUNT: usize = 40;
pub const MAX_SPRITES_PER_LINE: usize = 10;

bitflags! {
    /// OAM attribute byte (the fourth byte of each 4-byte sprite record).
    ///
    /// `PALETTE_NUMBER_CGB`/`TILE_VRAM_BANK` only have meaning in CGB mode;
    /// `PALETTE_NUMBER` only in DMG mode. Both halves always decode, the
    /// renderer picks whichever applies for the active model.
    #[derive(Default)]
    pub struct AttributeFlags: u8 {
        const PALETTE_NUMBER_CGB = 0b0000_0111;
        const TILE_VRAM_BANK     = 0b0000_1000;
        const PALETTE_NUMBER     = 0b0001_0000;
        const X_FLIP             = 0b0010_0000;
        const Y_FLIP             = 0b0100_0000;
        const OBJ_TO_BG_PRIORITY = 0b1000_0000;
    }
}

impl AttributeFlags {
    pub fn cgb_palette_number(&self) -> usize {
        (self.bits & 0x07) as usize
    }
}

/// One decoded 40-byte OAM record: y, x, tile index, attribute byte.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct SpriteEntry {
    pub y: u8,
    pub x: u8,
    pub tile: u8,
    pub attributes: AttributeFlags,
}

impl SpriteEntry {
    fn from_bytes(bytes: &[u8]) -> Self {
        SpriteEntry {
            y: bytes[0],
            x: bytes[1],
            tile: bytes[2],
            attributes: AttributeFlags::from_bits_truncate(bytes[3]),
        }
    }

    fn to_bytes(self) -> [u8; 4] {
        [self.y, self.x, self.tile, self.attributes.bits()]
    }
}

/// The 160-byte OAM region, readable either as raw bytes or as 40 fixed-layout
/// sprite records (spec §3).
#[derive(Clone)]
pub struct Oam {
    raw: [u8; OAM_SIZE],
}

impl Default for Oam {
    fn default() -> Self {
        Oam { raw: [0; OAM_SIZE] }
    }
}

impl Oam {
    pub fn read_byte(&self, address: u16) -> u8 {
        self.raw[address as usize]
    }

    pub fn write_byte(&mut self, address: u16, value: u8) {
        self.raw[address as usize] = value;
    }

    pub fn raw(&self) -> &[u8; OAM_SIZE] {
        &self.raw
    }

    pub fn raw_mut(&mut self) -> &mut [u8; OAM_SIZE] {
        &mut self.raw
    }

    pub fn sprite(&self, index: usize) -> SpriteEntry {
        SpriteEntry::from_bytes(&self.raw[index * 4..index * 4 + 4])
    }

    pub fn write_sprite(&mut self, index: usize, sprite: SpriteEntry) {
        self.raw[index * 4..index * 4 + 4].copy_from_slice(&sprite.to_bytes());
    }
}

/// Scan the 40 OAM entries in index order, selecting up to
/// [`MAX_SPRITES_PER_LINE`] sprites intersecting scanline `y`.
///
/// Matches `_cleanOAM` in the source: OAM index order, first 10 hits win. This
/// is the DMG sprite-priority rule; a port noted a TODO to sort by X for CGB-
/// style mixed priority, but left OAM order intact and deferred x-priority to
/// the renderer, which this core preserves (Design Notes §9).
pub fn scan_oam(oam: &Oam, y: u8, tall_sprites: bool) -> ArrayVec<[SpriteEntry; MAX_SPRITES_PER_LINE]> {
    let height: i16 = if tall_sprites { 16 } else { 8 };
    let mut selected = ArrayVec::new();

    for i in 0..OAM_ENTRY_COUNT {
        let sprite = oam.sprite(i);
        let oy = sprite.y as i16 - 16;
        if (y as i16) < oy || (y as i16) >= oy + height {
            continue;
        }
        selected.push(sprite);
        if selected.len() == MAX_SPRITES_PER_LINE {
            break;
        }
    }

    selected
}
