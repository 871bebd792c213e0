use super::powered_on;
use crate::model::GameModel;
use crate::video::TOTAL_LEN;

#[test]
fn frame_boundary_period_is_70224_dots() {
    let (mut core, mut host) = powered_on(GameModel::Dmg);

    let mut elapsed = 0i32;
    let mut boundaries = Vec::new();
    let mut last_frame_ended_count = host.frame_ended_count;

    while boundaries.len() < 2 {
        host.tick(&mut core, 4);
        elapsed += 4;
        if host.frame_ended_count != last_frame_ended_count {
            boundaries.push(elapsed);
            last_frame_ended_count = host.frame_ended_count;
        }
    }

    assert_eq!(boundaries[1] - boundaries[0], TOTAL_LEN);
    assert_eq!(host.frames_posted, 0); // DummyRenderer never hands back pixels
    assert!(host.thread_frame_ended_count >= 1); // VBlank entry fired the thread-frame-ended notification
}
