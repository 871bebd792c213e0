use super::powered_on;
use crate::interrupts::InterruptFlags;
use crate::model::GameModel;
use crate::video::registers::LcdStatus;
use crate::video::Mode;

#[test]
fn lyc_match_raises_lcdstat_when_coincidence_interrupt_enabled() {
    let (mut core, mut host) = powered_on(GameModel::Dmg);
    host.set_lyc(2);
    core.write_stat(&mut host, LcdStatus::COINCIDENCE_INTERRUPT.bits());
    host.raised.clear();

    while core.ly() != 2 {
        host.tick(&mut core, 4);
    }

    assert!(host.raised.contains(&InterruptFlags::LCDSTAT));
    assert_ne!(host.stat() & LcdStatus::COINCIDENCE_FLAG.bits(), 0);
}

#[test]
fn entering_hblank_raises_lcdstat_when_hblank_interrupt_enabled() {
    let (mut core, mut host) = powered_on(GameModel::Dmg);
    core.write_stat(&mut host, LcdStatus::MODE_0_H_INTERRUPT.bits());
    host.raised.clear();

    while core.mode() != Mode::HBlank {
        host.tick(&mut core, 1);
    }

    assert!(host.raised.contains(&InterruptFlags::LCDSTAT));
}

#[test]
fn lyc_write_outside_oam_search_does_not_reevaluate_coincidence() {
    let (mut core, mut host) = powered_on(GameModel::Dmg);
    // Drive into HBlank, away from OamScan.
    while core.mode() != Mode::HBlank {
        host.tick(&mut core, 1);
    }
    let stat_before = host.stat();
    core.write_lyc(&mut host, core.ly());
    assert_eq!(host.stat(), stat_before);
}
