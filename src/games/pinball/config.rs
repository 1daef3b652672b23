use std::f32::consts::PI;

use ratatui::style::Color;

/// Cosmetic styling for a table. Physics never reads it.
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: &'static str,
    pub icon: &'static str,
    pub background: Color,
    pub frame: Color,
    pub wall: Color,
    pub bumper: Color,
    pub bumper_core: Color,
    pub flipper: Color,
    pub flipper_active: Color,
    pub ball: Color,
    pub accent: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BumperSpec {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Everything that differs between pinball tables.
///
/// Flipper angles are given for the left flipper (screen coordinates,
/// y grows downward); the right flipper mirrors them around the vertical.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub width: f32,
    pub height: f32,

    pub ball_radius: f32,
    pub gravity: f32,
    pub friction: f32,
    pub restitution: f32,

    pub launch_x: f32,
    pub launch_y: f32,
    /// Vertical launch velocity (negative is up).
    pub launch_speed: f32,
    /// Horizontal launch velocity is drawn from `[-jitter, jitter]`.
    pub launch_jitter: f32,

    pub bumpers: Vec<BumperSpec>,
    pub bumper_speed: f32,
    pub bumper_points: u32,

    pub left_pivot: (f32, f32),
    pub right_pivot: (f32, f32),
    pub flipper_length: f32,
    pub flipper_width: f32,
    pub flipper_rest_angle: f32,
    pub flipper_active_angle: f32,
    pub flipper_rotation_speed: f32,
    pub flipper_speed: f32,
    pub flipper_points: u32,

    /// Award contact points only on the step a contact begins.
    pub debounce_contacts: bool,

    pub theme: Theme,
}

impl TableConfig {
    pub fn classic() -> Self {
        let width = 400.0;
        let height = 600.0;
        Self {
            width,
            height,
            ball_radius: 10.0,
            gravity: 0.3,
            friction: 0.99,
            restitution: 0.8,
            launch_x: width / 2.0,
            launch_y: height - 150.0,
            launch_speed: -10.0,
            launch_jitter: 2.0,
            bumpers: vec![
                BumperSpec { x: 120.0, y: 170.0, radius: 25.0 },
                BumperSpec { x: 280.0, y: 170.0, radius: 25.0 },
                BumperSpec { x: 200.0, y: 270.0, radius: 30.0 },
            ],
            bumper_speed: 8.0,
            bumper_points: 100,
            left_pivot: (110.0, 530.0),
            right_pivot: (width - 110.0, 530.0),
            flipper_length: 75.0,
            flipper_width: 8.0,
            flipper_rest_angle: 0.5,
            flipper_active_angle: -0.5,
            flipper_rotation_speed: 0.25,
            flipper_speed: 10.0,
            flipper_points: 50,
            debounce_contacts: false,
            theme: Theme {
                title: " Classic Pinball ",
                icon: "🎱",
                background: Color::Rgb(8, 15, 8),
                frame: Color::Rgb(200, 160, 50),
                wall: Color::Rgb(100, 80, 40),
                bumper: Color::Rgb(220, 80, 80),
                bumper_core: Color::Rgb(255, 200, 120),
                flipper: Color::Rgb(180, 150, 60),
                flipper_active: Color::Rgb(255, 220, 80),
                ball: Color::Rgb(230, 230, 240),
                accent: Color::Rgb(255, 200, 80),
            },
        }
    }

    /// The larger neon table: wider playfield and livelier impulses.
    pub fn neon() -> Self {
        let width = 450.0;
        let height = 650.0;
        Self {
            width,
            height,
            launch_x: width / 2.0,
            launch_y: height - 150.0,
            launch_speed: -9.0,
            bumpers: vec![
                BumperSpec { x: 135.0, y: 180.0, radius: 28.0 },
                BumperSpec { x: 315.0, y: 180.0, radius: 28.0 },
                BumperSpec { x: 225.0, y: 290.0, radius: 32.0 },
                BumperSpec { x: 225.0, y: 100.0, radius: 20.0 },
            ],
            bumper_speed: 10.0,
            left_pivot: (125.0, 580.0),
            right_pivot: (width - 125.0, 580.0),
            flipper_length: 85.0,
            flipper_speed: 12.0,
            theme: Theme {
                title: " Neon Pinball ",
                icon: "💠",
                background: Color::Rgb(10, 6, 24),
                frame: Color::Rgb(255, 0, 200),
                wall: Color::Rgb(0, 220, 255),
                bumper: Color::Rgb(255, 0, 150),
                bumper_core: Color::Rgb(255, 255, 255),
                flipper: Color::Rgb(0, 160, 200),
                flipper_active: Color::Rgb(0, 255, 255),
                ball: Color::Rgb(255, 255, 160),
                accent: Color::Rgb(0, 255, 200),
            },
            ..Self::classic()
        }
    }

    pub fn right_rest_angle(&self) -> f32 {
        PI - self.flipper_rest_angle
    }

    pub fn right_active_angle(&self) -> f32 {
        PI - self.flipper_active_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::pinball::geometry::unit;

    #[test]
    fn test_presets_share_physics_constants() {
        let classic = TableConfig::classic();
        let neon = TableConfig::neon();
        assert_eq!(classic.gravity, neon.gravity);
        assert_eq!(classic.friction, neon.friction);
        assert_eq!(classic.restitution, 0.8);
        assert_eq!(classic.bumper_points, 100);
        assert_eq!(classic.flipper_points, 50);
        assert!(neon.width > classic.width);
    }

    #[test]
    fn test_right_flipper_mirrors_left() {
        let table = TableConfig::classic();
        let (lx, ly) = unit(table.flipper_active_angle);
        let (rx, ry) = unit(table.right_active_angle());
        assert!((lx + rx).abs() < 1e-5);
        assert!((ly - ry).abs() < 1e-5);
        assert_eq!(table.left_pivot.0, table.width - table.right_pivot.0);
    }

    #[test]
    fn test_launch_point_clears_flippers() {
        for table in [TableConfig::classic(), TableConfig::neon()] {
            assert!(table.launch_y + table.ball_radius < table.left_pivot.1);
            assert!(table.launch_speed < 0.0);
        }
    }
}
