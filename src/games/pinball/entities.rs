use super::config::{BumperSpec, TableConfig};
use super::geometry::unit;

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub friction: f32,
    pub gravity: f32,
}

impl Ball {
    pub fn new(table: &TableConfig) -> Self {
        Self {
            x: table.launch_x,
            y: table.launch_y,
            vx: 0.0,
            vy: 0.0,
            radius: table.ball_radius,
            friction: table.friction,
            gravity: table.gravity,
        }
    }

    /// Parks the ball at (x, y) with no velocity.
    pub fn park(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.vx = 0.0;
        self.vy = 0.0;
    }

    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipperSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flipper {
    pub side: FlipperSide,
    pub pivot_x: f32,
    pub pivot_y: f32,
    pub length: f32,
    /// Collision half-thickness.
    pub width: f32,
    pub angle: f32,
    pub rest_angle: f32,
    pub active_angle: f32,
    pub active: bool,
    /// Radians per step.
    pub rotation_speed: f32,
}

impl Flipper {
    pub fn new(side: FlipperSide, table: &TableConfig) -> Self {
        let ((pivot_x, pivot_y), rest_angle, active_angle) = match side {
            FlipperSide::Left => (
                table.left_pivot,
                table.flipper_rest_angle,
                table.flipper_active_angle,
            ),
            FlipperSide::Right => (
                table.right_pivot,
                table.right_rest_angle(),
                table.right_active_angle(),
            ),
        };
        Self {
            side,
            pivot_x,
            pivot_y,
            length: table.flipper_length,
            width: table.flipper_width,
            angle: rest_angle,
            rest_angle,
            active_angle,
            active: false,
            rotation_speed: table.flipper_rotation_speed,
        }
    }

    pub fn reset(&mut self) {
        self.angle = self.rest_angle;
        self.active = false;
    }

    /// The angle the flipper is currently swinging toward.
    pub fn target_angle(&self) -> f32 {
        if self.active {
            self.active_angle
        } else {
            self.rest_angle
        }
    }

    pub fn tip(&self) -> (f32, f32) {
        let (dx, dy) = unit(self.angle);
        (self.pivot_x + dx * self.length, self.pivot_y + dy * self.length)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bumper {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl From<&BumperSpec> for Bumper {
    fn from(spec: &BumperSpec) -> Self {
        Bumper {
            x: spec.x,
            y: spec.y,
            radius: spec.radius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub side: WallSide,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Left, right and top boundaries. The bottom edge stays open as the drain.
pub fn boundary_walls(width: f32, height: f32) -> Vec<Wall> {
    vec![
        Wall { side: WallSide::Left, x1: 0.0, y1: 0.0, x2: 0.0, y2: height },
        Wall { side: WallSide::Right, x1: width, y1: 0.0, x2: width, y2: height },
        Wall { side: WallSide::Top, x1: 0.0, y1: 0.0, x2: width, y2: 0.0 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_starts_parked_at_launch_point() {
        let table = TableConfig::classic();
        let ball = Ball::new(&table);
        assert_eq!((ball.x, ball.y), (table.launch_x, table.launch_y));
        assert_eq!(ball.speed(), 0.0);
    }

    #[test]
    fn test_flippers_start_at_rest() {
        let table = TableConfig::classic();
        let left = Flipper::new(FlipperSide::Left, &table);
        let right = Flipper::new(FlipperSide::Right, &table);
        assert_eq!(left.angle, left.rest_angle);
        assert_eq!(right.angle, right.rest_angle);
        assert!(!left.active && !right.active);
        // Resting tips point down toward the drain.
        assert!(left.tip().1 > left.pivot_y);
        assert!(right.tip().1 > right.pivot_y);
        assert!(left.tip().0 < right.tip().0);
    }

    #[test]
    fn test_boundary_has_no_floor() {
        let walls = boundary_walls(400.0, 600.0);
        assert_eq!(walls.len(), 3);
        assert!(walls.iter().all(|w| w.y1 < 600.0 || w.y2 < 600.0));
        assert!(!walls.iter().any(|w| w.y1 == 600.0 && w.y2 == 600.0));
    }
}
