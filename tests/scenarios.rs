//! End-to-end gameplay scenarios driven through the public API

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use drip_drop::consts::BEST_SCORE_KEY;
use drip_drop::input::Command;
use drip_drop::persistence::{KeyValueStore, StorageError};
use drip_drop::sim::scoring::apply_contact;
use drip_drop::sim::{
    Callout, Contact, GameEvent, Hazard, Scene, Session, TickInput, scene, speed_for_score, tick,
};
use drip_drop::{Game, Tuning};
use glam::Vec2;

/// Store shared with the test so writes can be inspected
#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<HashMap<String, String>>>);

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.0.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn fresh_session() -> Session {
    let mut session = Session::new(2025, Tuning::default(), 0);
    let mut events = Vec::new();
    scene::start(&mut session, &mut events);
    session
}

fn drop_hazard_on_paddle(session: &mut Session) {
    let id = session.next_entity_id();
    session.hazards.push(Hazard {
        id,
        pos: Vec2::new(session.player.x, session.player.y),
        width: 24.0,
        height: 20.0,
        fall_speed: 0.0,
    });
}

/// Scenario A: rewarding droplet on a fresh session
fn scenario_a(session: &mut Session) -> Vec<GameEvent> {
    let mut events = Vec::new();
    apply_contact(
        session,
        Contact::Droplet {
            id: 1,
            rewarding: true,
        },
        &mut events,
    );
    events
}

/// Scenario B: hazard while powered
fn scenario_b(session: &mut Session) -> Vec<GameEvent> {
    let mut events = Vec::new();
    apply_contact(session, Contact::Hazard { id: 2 }, &mut events);
    events
}

#[test]
fn scenario_a_rewarding_droplet() {
    let mut session = fresh_session();
    assert_eq!((session.score, session.lives, session.speed), (0, 3, 2));

    let events = scenario_a(&mut session);
    assert_eq!(session.score, 5);
    assert_eq!(session.player.power_ms, 600.0);
    assert!(events.contains(&GameEvent::Callout(Callout::PowerUp)));
}

#[test]
fn scenario_b_shielded_hazard() {
    let mut session = fresh_session();
    scenario_a(&mut session);

    let events = scenario_b(&mut session);
    assert_eq!(session.score, 7);
    assert_eq!(session.lives, 3);
    assert_eq!(session.player.power_ms, 600.0);
    assert!(events.contains(&GameEvent::Callout(Callout::Shielded)));
}

#[test]
fn scenario_c_three_hits_end_the_run() {
    let store = SharedStore::default();
    store
        .0
        .borrow_mut()
        .insert(BEST_SCORE_KEY.to_string(), "3".to_string());

    let mut game = Game::new(77, Tuning::default(), Box::new(store.clone()));
    assert_eq!(game.best_score(), 3);
    game.input.command(Command::Start);

    let mut sink = Vec::new();
    let mut t = 0.0;
    game.frame(t, &mut sink);

    scenario_a(&mut game.session);
    scenario_b(&mut game.session);
    game.session.player.power_ms = 0.0;

    let mut lives_seen = Vec::new();
    for hit in 1..=3 {
        sink.clear();
        drop_hazard_on_paddle(&mut game.session);
        t += 16.0;
        game.frame(t, &mut sink);
        lives_seen.push(game.session.lives);

        let ended = sink.iter().any(|e| matches!(e, GameEvent::GameOver { .. }));
        assert_eq!(ended, hit == 3, "game over must fire on the third hit only");
    }

    assert_eq!(lives_seen, vec![2, 1, 0]);
    assert_eq!(game.scene(), Scene::GameOver);
    assert!(sink.contains(&GameEvent::GameOver { final_score: 7 }));
    assert!(sink.contains(&GameEvent::BestScoreChanged(7)));
    assert_eq!(game.best_score(), 7);
    assert_eq!(
        store.0.borrow().get(BEST_SCORE_KEY).map(String::as_str),
        Some("7")
    );

    // Nothing moves after the run ends
    let ticks = game.session.time_ticks;
    t += 16.0;
    game.frame(t, &mut sink);
    assert_eq!(game.session.time_ticks, ticks);
}

#[test]
fn scenario_c_lower_score_keeps_best() {
    let store = SharedStore::default();
    store
        .0
        .borrow_mut()
        .insert(BEST_SCORE_KEY.to_string(), "50".to_string());
    let mut game = Game::new(5, Tuning::default(), Box::new(store.clone()));
    game.input.command(Command::Start);
    let mut sink = Vec::new();
    game.frame(0.0, &mut sink);

    game.session.score = 7;
    game.session.lives = 1;
    drop_hazard_on_paddle(&mut game.session);
    game.frame(16.0, &mut sink);

    assert_eq!(game.scene(), Scene::GameOver);
    assert!(!sink.iter().any(|e| matches!(e, GameEvent::BestScoreChanged(_))));
    assert_eq!(game.best_score(), 50);
    assert_eq!(
        store.0.borrow().get(BEST_SCORE_KEY).map(String::as_str),
        Some("50")
    );
}

#[test]
fn scenario_d_restart_after_game_over() {
    let mut game = Game::new(9, Tuning::default(), Box::new(SharedStore::default()));
    game.input.command(Command::Start);
    let mut sink = Vec::new();
    game.frame(0.0, &mut sink);

    // Play a while so there is something to clear
    let mut t = 0.0;
    for _ in 0..300 {
        t += 16.0;
        game.frame(t, &mut sink);
    }
    game.session.score = 44;
    game.session.speed = 4;
    game.session.lives = 1;
    drop_hazard_on_paddle(&mut game.session);
    t += 16.0;
    game.frame(t, &mut sink);
    assert_eq!(game.scene(), Scene::GameOver);

    game.input.command(Command::Restart);
    t += 16.0;
    game.frame(t, &mut sink);

    let session = &game.session;
    assert_eq!(session.scene, Scene::Playing);
    assert_eq!((session.score, session.lives, session.speed), (0, 3, 2));
    assert!(session.droplets.is_empty());
    assert!(session.hazards.is_empty());
    assert_eq!(session.player.power_ms, 0.0);
}

#[test]
fn difficulty_steps_and_caps() {
    let tuning = Tuning::default();
    assert_eq!(speed_for_score(&tuning, 39), 3);
    assert_eq!(speed_for_score(&tuning, 40), 4);
    assert_eq!(speed_for_score(&tuning, 200), 8);
    assert_eq!(speed_for_score(&tuning, 5000), 8);
}

#[test]
fn difficulty_recomputed_each_tick() {
    let mut session = fresh_session();
    let mut events = Vec::new();

    session.score = 39;
    tick(&mut session, &TickInput::default(), 16.0, &mut events);
    assert_eq!(session.speed, 3);

    session.score = 40;
    tick(&mut session, &TickInput::default(), 16.0, &mut events);
    assert_eq!(session.speed, 4);

    session.score = 250;
    tick(&mut session, &TickInput::default(), 16.0, &mut events);
    assert_eq!(session.speed, 8);
}

#[test]
fn falling_entities_keep_spawn_velocity() {
    let mut session = fresh_session();
    let mut events = Vec::new();
    // Force a spawn at base speed
    tick(&mut session, &TickInput::default(), 400.0, &mut events);
    assert_eq!(session.droplets.len() + session.hazards.len(), 1);
    let before: Vec<f32> = session
        .droplets
        .iter()
        .map(|d| d.fall_speed)
        .chain(session.hazards.iter().map(|h| h.fall_speed))
        .collect();

    session.score = 200;
    tick(&mut session, &TickInput::default(), 1.0, &mut events);
    assert_eq!(session.speed, 8);
    let after: Vec<f32> = session
        .droplets
        .iter()
        .map(|d| d.fall_speed)
        .chain(session.hazards.iter().map(|h| h.fall_speed))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_unplayable_tuning_falls_back_and_runs() {
    for json in [
        r#"{ "droplet_radius_min": 10, "droplet_radius_max": 10, "droplet_chance": 1 }"#,
        r#"{ "world_width": 60 }"#,
    ] {
        let tuning = Tuning::from_json_or_default(json);
        assert_eq!(tuning, Tuning::default());

        let mut session = Session::new(3, tuning, 0);
        let mut events = Vec::new();
        scene::start(&mut session, &mut events);
        let input = TickInput {
            move_left: true,
            ..TickInput::default()
        };
        tick(&mut session, &input, 1000.0, &mut events);
        assert_eq!(session.scene, Scene::Playing);
        assert_eq!(session.droplets.len() + session.hazards.len(), 1);
    }
}
