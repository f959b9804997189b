use std::time::Duration;

use actuator::{Actuator, ActuatorConfig, Grid, Metadata, Tile};
use engine::{
    ViewTree,
    regression::{FrameHashRecorder, assert_or_update_golden_hashes, update_goldens_enabled},
    regression_golden_path,
};

fn record(actuator: &Actuator<ViewTree>, recorder: &mut FrameHashRecorder) {
    recorder
        .record(&actuator.surface().snapshot())
        .expect("hash frame");
}

/// Spawn, slide, merge, then a forced question answered wrong once and right once.
fn scripted_session() -> Vec<String> {
    let mut actuator = Actuator::headless(ActuatorConfig::default());
    let mut recorder = FrameHashRecorder::new();

    let spawn = Grid::with_tiles(4, 4, [Tile::new(0, 0, 2), Tile::new(2, 0, 2)]).expect("grid");
    actuator.render(spawn, Metadata::default()).expect("spawn");
    actuator.run_frame();
    record(&actuator, &mut recorder);

    let slide = Grid::with_tiles(
        4,
        4,
        [Tile::new(3, 0, 4).merged(vec![
            Tile::new(3, 0, 2).moved_from(0, 0),
            Tile::new(3, 0, 2).moved_from(2, 0),
        ])],
    )
    .expect("grid");
    let scored = Metadata {
        score: 4,
        best_score: 4,
        ..Metadata::default()
    };
    actuator.render(slide, scored).expect("merge");
    actuator.run_frame();
    record(&actuator, &mut recorder);
    actuator.run_frame();
    record(&actuator, &mut recorder);

    actuator.show_merge_message("4!");
    for _ in 0..6 {
        actuator.click(None);
    }
    record(&actuator, &mut recorder);

    actuator.answer(1).expect("wrong");
    record(&actuator, &mut recorder);
    actuator.tick(Duration::from_millis(1500));
    record(&actuator, &mut recorder);
    actuator.tick(Duration::from_millis(500));
    record(&actuator, &mut recorder);

    actuator.answer(0).expect("correct");
    record(&actuator, &mut recorder);

    recorder.into_hashes()
}

#[test]
fn scripted_session_frames_are_deterministic() {
    let a = scripted_session();
    let b = scripted_session();
    assert_eq!(a.len(), 8);
    assert_eq!(a, b);
    // Every step changes what is on screen.
    for pair in a.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn golden_scripted_session_hashes_are_stable() {
    let name = "golden_scripted_session_hashes_are_stable";
    let path = regression_golden_path!(name);
    assert_or_update_golden_hashes(&path, name, scripted_session(), update_goldens_enabled())
        .expect("golden frame hashes");
}
