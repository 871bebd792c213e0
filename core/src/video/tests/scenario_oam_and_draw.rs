use pretty_assertions::assert_eq;

use super::powered_on;
use crate::model::GameModel;
use crate::video::{Mode, HORIZ_LEN, MODE0_LEN_BASE, MODE2_LEN, MODE3_LEN_BASE};

#[test]
fn empty_scanline_spends_80_172_204_dots_in_oam_draw_hblank() {
    let (mut core, mut host) = powered_on(GameModel::Dmg);

    // The very first scanline after LCD power-on runs a shortened OAM phase
    // (MODE2_LEN - 5); wait for the second one, which is on steady-state timing.
    while !(core.ly() == 1 && core.mode() == Mode::OamScan) {
        host.tick(&mut core, 1);
    }

    let mut lengths = Vec::new();
    let mut run = 0;
    let mut last_mode = core.mode();
    loop {
        host.tick(&mut core, 1);
        run += 1;
        if core.mode() != last_mode {
            lengths.push(run);
            run = 0;
            last_mode = core.mode();
            if lengths.len() == 3 {
                break;
            }
        }
    }

    assert_eq!(lengths, vec![MODE2_LEN, MODE3_LEN_BASE, MODE0_LEN_BASE]);
    assert_eq!(lengths.iter().sum::<i32>(), HORIZ_LEN);
}
