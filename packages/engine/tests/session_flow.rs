use cave_engine::domain::config::EngineSettings;
use cave_engine::domain::content::{PackBuilder, CAVE_TILES};
use cave_engine::domain::input::Button;
use cave_engine::domain::sound::SoundCue;
use cave_engine::elements::*;
use cave_engine::simulation::session::{encode_save, save_key};
use cave_engine::simulation::MemoryStore;
use cave_engine::{EngineCore, Phase, TickOutcome};

/// Player, one screw and the ship on the top row.
fn screw_run_cave() -> Vec<ElementCode> {
    let mut tiles = vec![EL_SPACE; CAVE_TILES];
    tiles[0] = EL_PLAYER;
    tiles[1] = EL_SCREW;
    tiles[3] = EL_SHIP;
    tiles
}

fn two_cave_engine() -> EngineCore {
    let pack = PackBuilder::new()
        .standard_rules()
        .cave(&screw_run_cave(), 1)
        .cave(&screw_run_cave(), 1)
        .build()
        .unwrap();
    EngineCore::new(pack, EngineSettings::default())
}

#[test]
fn holding_right_clears_both_caves() {
    let mut engine = two_cave_engine();
    engine.new_game();
    assert!(engine.press(Button::Right as u8));

    let mut cues = Vec::new();
    let mut visited_second = false;
    let mut outcome = TickOutcome::Continue;
    for _ in 0..2000 {
        outcome = engine.tick(1);
        cues.extend(engine.take_sound_cues());
        visited_second |= engine.cave_index() == 1 && engine.phase() == Phase::Play;
        if outcome != TickOutcome::Continue {
            break;
        }
    }

    assert_eq!(outcome, TickOutcome::Advance);
    assert!(visited_second);
    assert_eq!(engine.phase(), Phase::Complete);
    assert_eq!(engine.cave_index(), 0);
    assert_eq!(engine.info().score, 2 * (100 + 1000));
    assert_eq!(engine.info().lives, 8);
    for cue in [SoundCue::Enter, SoundCue::Screw, SoundCue::Launch, SoundCue::Leave] {
        assert_eq!(cues.iter().filter(|c| **c == cue).count(), 2, "{:?}", cue);
    }

    // a finished engine stays put until the next game
    assert_eq!(engine.tick(1), TickOutcome::Continue);
    assert_eq!(engine.phase(), Phase::Complete);
}

#[test]
fn saved_progress_selects_the_starting_cave() {
    let pack = PackBuilder::new()
        .standard_rules()
        .cave(&screw_run_cave(), 1)
        .cave(&screw_run_cave(), 4)
        .build()
        .unwrap();
    let store = MemoryStore::with_entry(&save_key(2), &encode_save(1));
    let mut engine = EngineCore::with_store(pack, EngineSettings::default(), Box::new(store));
    engine.new_game();

    assert_eq!(engine.cave_index(), 1);
    assert_eq!(engine.info().cave, 2);
    assert_eq!(engine.info().screws, 4);
}

#[test]
fn faster_pass_cadence_from_settings_json() {
    let mut engine = two_cave_engine();
    let settings = EngineSettings::from_json(r#"{"passEvery": 1, "revealEvery": 1}"#).unwrap();
    engine.apply_settings(settings);
    engine.enable_perf_metrics(true);
    engine.new_game();

    // sixteen columns, then the switch to play
    for _ in 0..17 {
        engine.tick(1);
    }
    assert_eq!(engine.phase(), Phase::Play);

    let mut passes = 0;
    for _ in 0..5 {
        engine.tick(1);
        passes += engine.get_perf_stats().passes();
    }
    assert_eq!(passes, 5);
}
