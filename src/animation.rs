//! Host-facing animation entry point
//!
//! A host builds one [`BrickBreaker`] from the light table, then calls
//! [`Animation::render_next_frame`] once per frame with a buffer it owns.

use glam::Vec3;

use crate::consts::FACE_HALF_WIDTH;
use crate::error::{Error, Result};
use crate::geometry::{LightPoint, map_points};
use crate::renderer::{Rgb, from_bytes_mut, render};
use crate::settings::Settings;
use crate::sim::{BrickGrid, GameState, tick};

/// A frame-driven light animation
pub trait Animation {
    /// Advance one frame and write a color for every light into `buf`
    fn render_next_frame(&mut self, buf: &mut [Rgb]);

    /// Called once after the last frame
    fn shutdown(&mut self) {}
}

/// Self-playing brick breaker wrapped around the tree
#[derive(Debug)]
pub struct BrickBreaker {
    lights: Vec<LightPoint>,
    grid: BrickGrid,
    state: GameState,
    settings: Settings,
    /// Set once a mismatched buffer has been reported
    warned_buffer_len: bool,
}

impl BrickBreaker {
    /// Map the light table onto the tree and set up the first game
    pub fn new(points: &[Vec3], settings: Settings) -> Result<Self> {
        settings.validate()?;
        if points.is_empty() {
            return Err(Error::EmptyGeometry);
        }

        let lights = map_points(points);
        let grid = BrickGrid::build(&lights, settings.num_sections, settings.num_bands, settings.brick_floor);
        if grid.is_empty() {
            return Err(Error::NoBricks {
                num_sections: settings.num_sections,
                num_bands: settings.num_bands,
            });
        }
        let state = GameState::new(&grid, &settings);

        log::info!(
            "Brick breaker ready: {} lights, {}x{} grid, {} bricks averaging {:.1} lights",
            lights.len(),
            grid.num_sections,
            grid.num_bands,
            grid.len(),
            grid.average_members()
        );
        log::info!(
            "Face width {:.0}°, ball speed {}, paddle width {:.0}°, rotation {} rad/frame",
            (2.0 * FACE_HALF_WIDTH).to_degrees(),
            settings.ball_speed,
            settings.paddle_width.to_degrees(),
            settings.rotation_speed
        );

        Ok(Self {
            lights,
            grid,
            state,
            settings,
            warned_buffer_len: false,
        })
    }

    /// Same as [`Animation::render_next_frame`], for hosts holding a flat
    /// `r, g, b` byte buffer. Trailing bytes short of a whole light are left
    /// untouched.
    pub fn render_into_bytes(&mut self, bytes: &mut [u8]) {
        let whole = bytes.len() - bytes.len() % 3;
        if let Some(frame) = from_bytes_mut(&mut bytes[..whole]) {
            self.render_next_frame(frame);
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &BrickGrid {
        &self.grid
    }

    pub fn lights(&self) -> &[LightPoint] {
        &self.lights
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Number of lights, and the buffer length a frame expects
    pub fn num_lights(&self) -> usize {
        self.lights.len()
    }
}

impl Animation for BrickBreaker {
    fn render_next_frame(&mut self, buf: &mut [Rgb]) {
        if buf.len() != self.lights.len() && !self.warned_buffer_len {
            log::warn!(
                "Frame buffer holds {} lights, expected {}; extra lights are ignored",
                buf.len(),
                self.lights.len()
            );
            self.warned_buffer_len = true;
        }

        tick(&mut self.state, &self.grid, &self.settings);
        render(&self.state, &self.lights, &self.grid, &self.settings, buf);
    }

    fn shutdown(&mut self) {
        log::info!(
            "Brick breaker stopped after {} frames and {} games",
            self.state.frame_count(),
            self.state.games_played()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::geometry::spiral_cone;
    use crate::sim::{Ball, BrickColor, GamePhase};

    fn engine() -> BrickBreaker {
        BrickBreaker::new(&spiral_cone(NUM_LIGHTS), Settings::default()).unwrap()
    }

    fn clear_front(engine: &mut BrickBreaker) {
        let front = engine.state.face.front_sections(&engine.grid);
        for brick in engine.state.bricks.iter_mut() {
            if front[brick.section as usize] {
                brick.active = false;
            }
        }
    }

    fn drop_ball(engine: &mut BrickBreaker) {
        engine.state.ball = Ball {
            theta: engine.state.face.viewing_angle,
            height: 0.02,
            theta_velocity: 0.0,
            height_velocity: -0.05,
        };
        // Keep the paddle well clear of the falling ball
        engine.state.paddle.theta = engine.state.face.viewing_angle + 0.8;
    }

    #[test]
    fn test_first_frame_colors() {
        let mut engine = engine();
        let mut buf = vec![Rgb::BLACK; engine.num_lights()];
        engine.render_next_frame(&mut buf);

        assert_eq!(engine.state().phase(), GamePhase::Playing);
        assert_eq!(engine.state().lives(), STARTING_LIVES);

        // The ball and paddle sit below the brick area, so bricks show through
        let front = engine.state().face.front_sections(engine.grid());
        for brick in engine.state().bricks() {
            let expected = match (brick.color, front[brick.section as usize]) {
                (BrickColor::Red, true) => BRICK_RED,
                (BrickColor::Green, true) => BRICK_GREEN,
                (BrickColor::Red, false) => BRICK_RED_DIM,
                (BrickColor::Green, false) => BRICK_GREEN_DIM,
            };
            for &i in &brick.members {
                assert_eq!(buf[i], expected);
            }
        }
        assert!(buf.contains(&BALL_COLOR));
        assert!(buf.contains(&PADDLE_COLOR));
        assert!(buf.contains(&BACKGROUND));

        let allowed = [
            BACKGROUND,
            BRICK_RED,
            BRICK_GREEN,
            BRICK_RED_DIM,
            BRICK_GREEN_DIM,
            PADDLE_COLOR,
            BALL_COLOR,
        ];
        assert!(buf.iter().all(|p| allowed.contains(p)));
    }

    #[test]
    fn test_cleared_face_starts_rainbow() {
        let mut engine = engine();
        clear_front(&mut engine);
        let mut buf = vec![Rgb::BLACK; engine.num_lights()];
        engine.render_next_frame(&mut buf);
        assert_eq!(engine.state().phase(), GamePhase::Won);

        engine.render_next_frame(&mut buf);
        assert_eq!(engine.state().sub_animation_frame(), 1);
        assert!(!buf.contains(&BACKGROUND));
    }

    #[test]
    fn test_win_animation_at_max_fps() {
        let settings = Settings {
            fps: Some(MAX_FPS),
            ..Default::default()
        };
        let mut engine = BrickBreaker::new(&spiral_cone(NUM_LIGHTS), settings).unwrap();
        clear_front(&mut engine);
        let mut buf = vec![Rgb::BLACK; engine.num_lights()];
        for _ in 0..5 {
            engine.render_next_frame(&mut buf);
        }
        assert_eq!(engine.state().phase(), GamePhase::Won);
        assert_eq!(engine.state().sub_animation_frame(), 4);
    }

    #[test]
    fn test_last_life_lost() {
        let mut engine = engine();
        let mut buf = vec![Rgb::BLACK; engine.num_lights()];
        for expected_lives in (0..STARTING_LIVES).rev() {
            drop_ball(&mut engine);
            engine.render_next_frame(&mut buf);
            assert_eq!(engine.state().lives(), expected_lives);
        }
        assert_eq!(engine.state().phase(), GamePhase::Lost);
    }

    #[test]
    fn test_loss_cycles_back_to_full_board() {
        let mut engine = engine();
        let mut buf = vec![Rgb::BLACK; engine.num_lights()];
        for brick in engine.state.bricks.iter_mut().take(20) {
            brick.active = false;
        }
        for _ in 0..STARTING_LIVES {
            drop_ball(&mut engine);
            engine.render_next_frame(&mut buf);
        }
        assert_eq!(engine.state().phase(), GamePhase::Lost);
        let angle_at_loss = engine.state().face.viewing_angle;

        let duration = engine.settings().frames_for(LOSS_ANIMATION_SECS);
        assert_eq!(duration, 120);
        for _ in 1..duration {
            engine.render_next_frame(&mut buf);
            assert_eq!(engine.state().phase(), GamePhase::Lost);
        }
        engine.render_next_frame(&mut buf);

        assert_eq!(engine.state().phase(), GamePhase::Playing);
        assert_eq!(engine.state().lives(), STARTING_LIVES);
        assert_eq!(engine.state().active_bricks(), engine.grid().len());
        assert_eq!(engine.state().games_played(), 1);
        assert_ne!(engine.state().face.viewing_angle, angle_at_loss);
        // The reset frame already shows the fresh board
        assert!(buf.contains(&BRICK_RED));
    }

    #[test]
    fn test_brick_count_survives_win_cycle() {
        let mut engine = engine();
        let total = engine.grid().len();
        let mut buf = vec![Rgb::BLACK; engine.num_lights()];
        clear_front(&mut engine);

        let duration = engine.settings().frames_for(WIN_ANIMATION_SECS);
        for _ in 0..=duration {
            engine.render_next_frame(&mut buf);
        }
        assert_eq!(engine.state().phase(), GamePhase::Playing);
        assert_eq!(engine.state().bricks().len(), total);
        assert_eq!(engine.state().active_bricks(), total);
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            BrickBreaker::new(&[], Settings::default()),
            Err(Error::EmptyGeometry)
        ));

        // A flat table maps every light to height 0, below the brick floor
        let flat: Vec<Vec3> = (0..50).map(|i| Vec3::new((i as f32).cos(), (i as f32).sin(), 0.0)).collect();
        assert!(matches!(
            BrickBreaker::new(&flat, Settings::default()),
            Err(Error::NoBricks {
                num_sections: 8,
                num_bands: 8
            })
        ));

        let settings = Settings {
            ball_speed: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            BrickBreaker::new(&spiral_cone(NUM_LIGHTS), settings),
            Err(Error::InvalidSetting { name: "ball_speed", .. })
        ));

        // Oversized grids are rejected before any cell table is allocated
        let settings = Settings {
            num_sections: 70_000,
            num_bands: 70_000,
            ..Default::default()
        };
        assert!(matches!(
            BrickBreaker::new(&spiral_cone(NUM_LIGHTS), settings),
            Err(Error::InvalidSetting { name: "num_bands", .. })
        ));

        let settings = Settings {
            fps: Some(2_000_000_000),
            ..Default::default()
        };
        assert!(matches!(
            BrickBreaker::new(&spiral_cone(NUM_LIGHTS), settings),
            Err(Error::InvalidSetting { name: "fps", .. })
        ));
    }

    #[test]
    fn test_mismatched_buffers() {
        let mut engine = engine();
        let mut short = vec![Rgb::BLACK; 10];
        engine.render_next_frame(&mut short);
        let mut long = vec![Rgb::BLACK; engine.num_lights() + 5];
        engine.render_next_frame(&mut long);
        assert_eq!(engine.state().frame_count(), 2);
        assert_eq!(long[engine.num_lights()], BACKGROUND);
    }

    #[test]
    fn test_render_into_bytes() {
        let mut engine = engine();
        let mut bytes = vec![0u8; engine.num_lights() * 3 + 1];
        engine.render_into_bytes(&mut bytes);
        assert_eq!(engine.state().frame_count(), 1);
        assert_eq!(*bytes.last().unwrap(), 0);
        assert!(bytes.chunks_exact(3).any(|c| c == [BACKGROUND.r, BACKGROUND.g, BACKGROUND.b]));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let mut animation: Box<dyn Animation> = Box::new(engine());
        let mut buf = vec![Rgb::BLACK; NUM_LIGHTS];
        animation.render_next_frame(&mut buf);
        animation.shutdown();
    }
}
