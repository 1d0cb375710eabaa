//! Scene state machine
//!
//! ```text
//! Menu --start--> Playing <--pause--> Paused
//!                    |                   |
//!             lives reach 0           restart / menu
//!                    v
//!                 GameOver --restart--> Playing
//! ```
//!
//! Each transition returns whether it applied; commands that make no sense in
//! the current scene are ignored.

use super::events::{EventSink, GameEvent};
use super::state::{Scene, Session};

fn enter(session: &mut Session, scene: Scene, sink: &mut impl EventSink) {
    if session.scene != scene {
        log::info!("Scene {:?} -> {:?}", session.scene, scene);
        session.scene = scene;
        sink.emit(GameEvent::SceneChanged(scene));
    }
}

fn begin_run(session: &mut Session, sink: &mut impl EventSink) {
    session.reset();
    sink.emit(GameEvent::ScoreChanged(session.score));
    sink.emit(GameEvent::LivesChanged(session.lives));
    enter(session, Scene::Playing, sink);
}

/// Leave the menu and start a fresh run
pub fn start(session: &mut Session, sink: &mut impl EventSink) -> bool {
    if session.scene != Scene::Menu {
        return false;
    }
    begin_run(session, sink);
    true
}

/// Throw away the current run and start over
pub fn restart(session: &mut Session, sink: &mut impl EventSink) -> bool {
    match session.scene {
        Scene::Playing | Scene::Paused | Scene::GameOver => {
            begin_run(session, sink);
            true
        }
        Scene::Menu => false,
    }
}

/// Flip between Playing and Paused
pub fn toggle_pause(session: &mut Session, sink: &mut impl EventSink) -> bool {
    match session.scene {
        Scene::Playing => enter(session, Scene::Paused, sink),
        Scene::Paused => enter(session, Scene::Playing, sink),
        Scene::Menu | Scene::GameOver => return false,
    }
    true
}

/// Abandon the run and go back to the title screen
pub fn quit_to_menu(session: &mut Session, sink: &mut impl EventSink) -> bool {
    match session.scene {
        Scene::Paused | Scene::GameOver => {
            session.reset();
            enter(session, Scene::Menu, sink);
            true
        }
        Scene::Menu | Scene::Playing => false,
    }
}

/// End the run: record a new best score if earned, then stop play
pub fn game_over(session: &mut Session, sink: &mut impl EventSink) {
    if session.score > session.best_score {
        log::info!("New best score {} (was {})", session.score, session.best_score);
        session.best_score = session.score;
        sink.emit(GameEvent::BestScoreChanged(session.best_score));
    }
    enter(session, Scene::GameOver, sink);
    sink.emit(GameEvent::GameOver {
        final_score: session.score,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn session() -> Session {
        Session::new(3, Tuning::default(), 10)
    }

    #[test]
    fn test_start_only_from_menu() {
        let mut s = session();
        let mut events = Vec::new();
        assert!(start(&mut s, &mut events));
        assert_eq!(s.scene, Scene::Playing);
        assert!(events.contains(&GameEvent::SceneChanged(Scene::Playing)));
        assert!(!start(&mut s, &mut events));
    }

    #[test]
    fn test_pause_round_trip() {
        let mut s = session();
        let mut events = Vec::new();
        start(&mut s, &mut events);
        assert!(toggle_pause(&mut s, &mut events));
        assert_eq!(s.scene, Scene::Paused);
        assert!(toggle_pause(&mut s, &mut events));
        assert_eq!(s.scene, Scene::Playing);
    }

    #[test]
    fn test_pause_ignored_outside_play() {
        let mut s = session();
        let mut events = Vec::new();
        assert!(!toggle_pause(&mut s, &mut events));
        assert_eq!(s.scene, Scene::Menu);
        s.scene = Scene::GameOver;
        assert!(!toggle_pause(&mut s, &mut events));
        assert_eq!(s.scene, Scene::GameOver);
        assert!(events.is_empty());
    }

    #[test]
    fn test_game_over_records_only_higher_best() {
        let mut s = session();
        let mut events = Vec::new();
        start(&mut s, &mut events);
        s.score = 7;
        game_over(&mut s, &mut events);
        assert_eq!(s.best_score, 10);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::BestScoreChanged(_))));
        assert!(events.contains(&GameEvent::GameOver { final_score: 7 }));

        restart(&mut s, &mut events);
        s.score = 11;
        events.clear();
        game_over(&mut s, &mut events);
        assert_eq!(s.best_score, 11);
        assert_eq!(
            events,
            vec![
                GameEvent::BestScoreChanged(11),
                GameEvent::SceneChanged(Scene::GameOver),
                GameEvent::GameOver { final_score: 11 },
            ]
        );
    }

    #[test]
    fn test_quit_to_menu_discards_run() {
        let mut s = session();
        let mut events = Vec::new();
        start(&mut s, &mut events);
        s.score = 30;
        assert!(!quit_to_menu(&mut s, &mut events));
        toggle_pause(&mut s, &mut events);
        assert!(quit_to_menu(&mut s, &mut events));
        assert_eq!(s.scene, Scene::Menu);
        assert_eq!(s.score, 0);
    }
}
