//! Scene building: game state to an ordered list of 2D draw commands
//!
//! Pure and backend-agnostic; the canvas backend just replays the list.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Color, EnemyKind, GameState};

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// One drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole field
    Clear { color: Color },
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        /// Font size in px (Arial)
        size_px: u32,
        align: TextAlign,
        color: Color,
    },
}

const HUD_FONT_PX: u32 = 20;
const BANNER_FONT_PX: u32 = 40;
const PIP_SIZE: f32 = 5.0;
const HEALTH_BAR_HEIGHT: f32 = 3.0;
const POWERUP_RADIUS: f32 = POWERUP_SIZE / 2.0;

fn rect(x: f32, y: f32, w: f32, h: f32, color: Color) -> DrawCmd {
    DrawCmd::Rect {
        pos: Vec2::new(x, y),
        size: Vec2::new(w, h),
        color,
    }
}

fn text(x: f32, y: f32, text: String, size_px: u32, align: TextAlign) -> DrawCmd {
    DrawCmd::Text {
        pos: Vec2::new(x, y),
        text,
        size_px,
        align,
        color: Color::WHITE,
    }
}

/// Build the frame for the current state
pub fn build_scene(state: &GameState) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(
        8 + state.bullets.len() + state.enemies.len() * 2 + state.powerups.len(),
    );

    cmds.push(DrawCmd::Clear {
        color: Color::BLACK,
    });

    // Player, centered on its position
    let player = &state.player;
    let ship_color = if player.shield {
        Color::CYAN
    } else {
        Color::GREEN
    };
    let half = PLAYER_SIZE / 2.0;
    cmds.push(rect(
        player.pos.x - half,
        player.pos.y - half,
        PLAYER_SIZE,
        PLAYER_SIZE,
        ship_color,
    ));

    // Power level pips
    for i in 0..player.power_level {
        cmds.push(rect(
            player.pos.x - 10.0 + i as f32 * 10.0,
            player.pos.y + 20.0,
            PIP_SIZE,
            PIP_SIZE,
            Color::WHITE,
        ));
    }

    let half_bullet = BULLET_SIZE / 2.0;
    for bullet in &state.bullets {
        cmds.push(rect(
            bullet.pos.x - half_bullet,
            bullet.pos.y - half_bullet,
            BULLET_SIZE,
            BULLET_SIZE,
            Color::YELLOW,
        ));
    }

    for enemy in &state.enemies {
        cmds.push(rect(
            enemy.pos.x,
            enemy.pos.y,
            enemy.size.x,
            enemy.size.y,
            enemy.color,
        ));
        if enemy.kind == EnemyKind::Tank {
            cmds.push(rect(
                enemy.pos.x,
                enemy.pos.y - 5.0,
                enemy.health_fraction() * enemy.size.x,
                HEALTH_BAR_HEIGHT,
                Color::GREEN,
            ));
        }
    }

    for powerup in &state.powerups {
        cmds.push(DrawCmd::Circle {
            center: powerup.pos + Vec2::splat(POWERUP_RADIUS),
            radius: POWERUP_RADIUS,
            color: powerup.color,
        });
    }

    // HUD
    cmds.push(text(10.0, 30.0, format!("Score: {}", state.score), HUD_FONT_PX, TextAlign::Left));
    cmds.push(text(
        10.0,
        60.0,
        format!("High Score: {}", state.high_score),
        HUD_FONT_PX,
        TextAlign::Left,
    ));
    cmds.push(text(
        10.0,
        90.0,
        format!("Level: {}", state.difficulty),
        HUD_FONT_PX,
        TextAlign::Left,
    ));

    if state.is_game_over() {
        let cx = FIELD_WIDTH / 2.0;
        let cy = FIELD_HEIGHT / 2.0;
        cmds.push(text(cx, cy, "GAME OVER".to_string(), BANNER_FONT_PX, TextAlign::Center));
        cmds.push(text(
            cx,
            cy + 40.0,
            "Click to restart".to_string(),
            HUD_FONT_PX,
            TextAlign::Center,
        ));
    }

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Bullet, Enemy, GamePhase, Powerup, PowerupKind};

    fn rects_of(cmds: &[DrawCmd], color: Color) -> Vec<(Vec2, Vec2)> {
        cmds.iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Rect { pos, size, color: c } if *c == color => Some((*pos, *size)),
                _ => None,
            })
            .collect()
    }

    fn texts(cmds: &[DrawCmd]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_frame_starts_with_clear() {
        let cmds = build_scene(&GameState::new(0));
        assert_eq!(
            cmds[0],
            DrawCmd::Clear {
                color: Color::BLACK
            }
        );
    }

    #[test]
    fn test_player_color_and_placement() {
        let mut state = GameState::new(0);
        let cmds = build_scene(&state);
        assert_eq!(
            rects_of(&cmds, Color::GREEN),
            vec![(Vec2::new(185.0, 485.0), Vec2::splat(30.0))]
        );

        state.player.shield = true;
        let cmds = build_scene(&state);
        assert!(rects_of(&cmds, Color::GREEN).is_empty());
        assert_eq!(rects_of(&cmds, Color::CYAN).len(), 1);
    }

    #[test]
    fn test_power_pips() {
        let mut state = GameState::new(0);
        state.player.power_level = 3;
        let pips: Vec<_> = rects_of(&build_scene(&state), Color::WHITE)
            .into_iter()
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(
            pips,
            vec![
                Vec2::new(190.0, 520.0),
                Vec2::new(200.0, 520.0),
                Vec2::new(210.0, 520.0)
            ]
        );
    }

    #[test]
    fn test_bullets_centered() {
        let mut state = GameState::new(0);
        state.bullets.push(Bullet::new(50.0, 60.0));
        let bullets = rects_of(&build_scene(&state), Color::YELLOW);
        assert_eq!(bullets, vec![(Vec2::new(48.0, 58.0), Vec2::splat(4.0))]);
    }

    #[test]
    fn test_tank_health_bar() {
        let mut state = GameState::new(0);
        let mut tank = Enemy::new(EnemyKind::Tank, 30.0);
        tank.pos.y = 40.0;
        tank.hp = 2;
        state.enemies.push(tank);
        state.enemies.push(Enemy::new(EnemyKind::Normal, 100.0));

        let cmds = build_scene(&state);
        // Player plus one health bar
        let green = rects_of(&cmds, Color::GREEN);
        assert_eq!(green.len(), 2);
        let (pos, size) = green[1];
        assert_eq!(pos, Vec2::new(30.0, 35.0));
        assert!((size.x - 20.0).abs() < 1e-4);
        assert_eq!(size.y, 3.0);
    }

    #[test]
    fn test_powerup_circle() {
        let mut state = GameState::new(0);
        state.powerups.push(Powerup::new(PowerupKind::Shield, 100.0));
        let circle = build_scene(&state)
            .into_iter()
            .find(|c| matches!(c, DrawCmd::Circle { .. }));
        assert_eq!(
            circle,
            Some(DrawCmd::Circle {
                center: Vec2::new(107.5, 7.5),
                radius: 7.5,
                color: Color(0x0000ff),
            })
        );
    }

    #[test]
    fn test_hud_text() {
        let mut state = GameState::new(1200);
        state.score = 300;
        let cmds = build_scene(&state);
        assert_eq!(texts(&cmds), vec!["Score: 300", "High Score: 1200", "Level: 1"]);
    }

    #[test]
    fn test_game_over_banner() {
        let mut state = GameState::new(0);
        state.phase = GamePhase::GameOver;
        let cmds = build_scene(&state);
        let all = texts(&cmds);
        assert!(all.contains(&"GAME OVER"));
        assert!(all.contains(&"Click to restart"));
        assert!(matches!(
            cmds.last(),
            Some(DrawCmd::Text { align: TextAlign::Center, .. })
        ));
    }
}
