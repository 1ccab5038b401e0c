//! Per-frame tick
//!
//! Stage order is fixed: camera, recycle and spawn, player reaction, wrap,
//! game-over check. Each stage feeds the next.

use serde::{Deserialize, Serialize};

use super::collision::CollisionFeed;
use super::error::SimError;
use super::player::{FrameContext, InputSnapshot};
use super::state::{GameEvent, GameState, RunStatus};

/// Everything the host hands the simulation for one frame
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub controls: InputSnapshot,
    pub contact: CollisionFeed,
}

/// Advance the run by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<RunStatus, SimError> {
    if state.status == RunStatus::GameOver {
        return Ok(RunStatus::GameOver);
    }
    state.frame += 1;

    state.camera.follow(&state.player.player);
    let scroll_y = state.camera.scroll_y();

    recycle_platforms(state, scroll_y)?;

    state.player.tick(
        &input.controls,
        &input.contact,
        FrameContext {
            carrots: &mut state.carrots,
            score: &mut state.score,
            events: &mut state.events,
        },
    );

    state.player.wrap_horizontal(state.settings.viewport.width);

    let bottom_y = state.platforms.bottom_most().pos.y;
    let player_y = state.player.player.pos.y;
    if is_game_over(player_y, bottom_y, state.settings.fall_limit) {
        state.status = RunStatus::GameOver;
        state.events.push(GameEvent::RunEnded { score: state.score });
        log::info!(
            "Game over at frame {}: player y {} below platform y {}, score {}",
            state.frame,
            player_y,
            bottom_y,
            state.score
        );
    }

    Ok(state.status)
}

/// Move off-screen platforms above the view and hang a fresh carrot over each
fn recycle_platforms(state: &mut GameState, scroll_y: f32) -> Result<(), SimError> {
    let carrots_enabled = state.settings.carrots_enabled;
    let threshold = state.platforms.recycle_threshold(scroll_y);

    if carrots_enabled {
        state.carrots.cull_below(threshold, &mut state.events);
    }

    let recycled = state.platforms.tick(scroll_y, &mut state.rng);
    if !carrots_enabled {
        return Ok(());
    }

    for event in recycled {
        let platform = state.platforms.recycled_mut(event);
        // The previous carrot goes with the old position
        if let Some(old) = platform.carrot.take() {
            state.carrots.release(old, &mut state.events);
        }
        let id = state
            .carrots
            .on_platform_recycled(platform, &mut state.events)?;
        platform.carrot = Some(id);
    }
    Ok(())
}

/// The run is lost once the player is more than `fall_limit` below the lowest
/// platform
pub fn is_game_over(player_y: f32, bottom_platform_y: f32, fall_limit: f32) -> bool {
    player_y > bottom_platform_y + fall_limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::collision::detect_contacts;
    use crate::sim::player::VisualState;
    use crate::sim::state::Entity;
    use glam::Vec2;

    const PLATFORM_YS: [f32; 5] = [0.0, 150.0, 300.0, 450.0, 600.0];

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_game_over_threshold() {
        assert!(!is_game_over(800.0, 600.0, 200.0));
        assert!(is_game_over(801.0, 600.0, 200.0));
        assert!(is_game_over(850.0, 600.0, 200.0));
        assert!(!is_game_over(320.0, 600.0, 200.0));
    }

    #[test]
    fn test_tick_game_over_literal() {
        for (player_y, expected) in [
            (800.0, RunStatus::Continue),
            (801.0, RunStatus::GameOver),
            (850.0, RunStatus::GameOver),
        ] {
            let mut state = GameState::new(Settings::basic()).unwrap();
            state.platforms.set_heights(&PLATFORM_YS);
            state.player.player.pos.y = player_y;
            assert_eq!(tick(&mut state, &idle()).unwrap(), expected, "y = {player_y}");
        }
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = GameState::new(Settings::basic()).unwrap();
        state.platforms.set_heights(&PLATFORM_YS);
        state.player.player.pos.y = 900.0;

        assert_eq!(tick(&mut state, &idle()).unwrap(), RunStatus::GameOver);
        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::RunEnded { score: 0 }]);

        // Further ticks change nothing and do not re-signal
        let frame = state.frame;
        state.player.player.pos.y = 0.0;
        state.advance(1.0);
        assert_eq!(tick(&mut state, &idle()).unwrap(), RunStatus::GameOver);
        assert_eq!(state.frame, frame);
        assert_eq!(state.player.player.pos.y, 0.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_recycle_spawns_carrot_above_platform() {
        let mut state = GameState::new(Settings::default()).unwrap();
        // Camera climbs to scroll_y = -200: platform at 600 is off-screen
        state.player.player.pos.y = 120.0;
        tick(&mut state, &idle()).unwrap();

        let recycled: Vec<_> = state
            .platforms
            .platforms()
            .iter()
            .filter(|p| p.carrot.is_some())
            .collect();
        assert_eq!(recycled.len(), 1);
        let platform = recycled[0];
        assert_eq!(platform.id, 4);
        assert!(platform.pos.y < state.camera.scroll_y());

        let carrot = state.carrots.get(platform.carrot.unwrap()).unwrap();
        assert!(carrot.active);
        assert_eq!(
            carrot.pos,
            Vec2::new(platform.pos.x, platform.pos.y - platform.size.y)
        );
        assert!(
            state
                .events
                .contains(&GameEvent::BodyEnabled(platform.carrot.unwrap()))
        );
    }

    #[test]
    fn test_basic_variant_spawns_no_carrots() {
        let mut state = GameState::new(Settings::basic()).unwrap();
        state.player.player.pos.y = -1000.0;
        tick(&mut state, &idle()).unwrap();
        assert_eq!(state.carrots.active_count(), 0);
        assert!(state.platforms.platforms().iter().all(|p| p.carrot.is_none()));
    }

    #[test]
    fn test_recycling_releases_previous_carrot() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let mut y = 320.0;
        for _ in 0..400 {
            y -= 20.0;
            state.player.player.pos.y = y;
            state.player.player.vel.y = -300.0;
            assert_eq!(tick(&mut state, &idle()).unwrap(), RunStatus::Continue);
            assert!(state.carrots.active_count() <= state.platforms.len());
            assert_eq!(state.platforms.len(), 5);
        }
    }

    #[test]
    fn test_collecting_scores() {
        let mut state = GameState::new(Settings::default()).unwrap();
        state.player.player.pos.y = 120.0;
        tick(&mut state, &idle()).unwrap();
        let (id, _) = state.carrots.active().next().unwrap();

        let input = TickInput {
            contact: CollisionFeed::overlapping(id),
            ..Default::default()
        };
        tick(&mut state, &input).unwrap();
        assert_eq!(state.score, 1);
        assert_eq!(state.carrots.active_count(), 0);

        // Same overlap reported again: nothing
        tick(&mut state, &input).unwrap();
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_player_wraps_during_tick() {
        let mut state = GameState::new(Settings::default()).unwrap();
        state.player.player.pos.x = 530.0;
        tick(&mut state, &idle()).unwrap();
        assert_eq!(state.player.player.pos.x, -30.0);
    }

    #[test]
    fn test_detected_contacts_drive_bounces() {
        let mut state = GameState::new(Settings::default().with_seed(4)).unwrap();
        // Drop straight onto a platform under the spawn point
        let x = state.platforms.platforms()[3].pos.x;
        state.player.player.pos.x = x;

        let mut landings = 0;
        for _ in 0..600 {
            state.advance(crate::consts::FRAME_DT);
            let input = TickInput {
                contact: detect_contacts(&state),
                ..Default::default()
            };
            if input.contact.touching_down && state.player.player.vel.y >= 0.0 {
                landings += 1;
            }
            if tick(&mut state, &input).unwrap() == RunStatus::GameOver {
                break;
            }
        }
        assert!(landings > 0);
        assert!(state.drain_events().contains(&GameEvent::SetVisualState(
            Entity::Player,
            VisualState::Jumping
        )));
    }
}
