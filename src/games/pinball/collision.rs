//! Ball contact resolution against walls, bumpers and flippers.
//!
//! Every resolver corrects the ball's position first and then rewrites its
//! velocity. Bumpers and flippers do not reflect: they override the velocity
//! with a fixed-speed impulse.

use super::entities::{Ball, Bumper, Flipper, Wall, WallSide};
use super::geometry::{circles_overlap, project_onto_segment, push_out, unit};

/// Bounces the ball off one axis-aligned boundary. Returns true on contact.
pub fn resolve_wall(ball: &mut Ball, wall: &Wall, restitution: f32) -> bool {
    match wall.side {
        WallSide::Left => {
            if ball.x - ball.radius < wall.x1 {
                ball.x = wall.x1 + ball.radius;
                ball.vx = -ball.vx * restitution;
                return true;
            }
        }
        WallSide::Right => {
            if ball.x + ball.radius > wall.x1 {
                ball.x = wall.x1 - ball.radius;
                ball.vx = -ball.vx * restitution;
                return true;
            }
        }
        WallSide::Top => {
            if ball.y - ball.radius < wall.y1 {
                ball.y = wall.y1 + ball.radius;
                ball.vy = -ball.vy * restitution;
                return true;
            }
        }
    }
    false
}

/// Kicks the ball away from a bumper it overlaps. Returns true on contact.
pub fn resolve_bumper(ball: &mut Ball, bumper: &Bumper, kick_speed: f32) -> bool {
    if !circles_overlap(ball.x, ball.y, ball.radius, bumper.x, bumper.y, bumper.radius) {
        return false;
    }
    let (x, y, angle) = push_out(bumper.x, bumper.y, ball.x, ball.y, ball.radius + bumper.radius);
    let (ux, uy) = unit(angle);
    ball.x = x;
    ball.y = y;
    ball.vx = ux * kick_speed;
    ball.vy = uy * kick_speed;
    true
}

/// Launches the ball along the flipper's current angle when it touches the
/// flipper's body. Returns true on contact.
pub fn resolve_flipper(ball: &mut Ball, flipper: &Flipper, kick_speed: f32) -> bool {
    let Some(hit) = project_onto_segment(
        ball.x,
        ball.y,
        flipper.pivot_x,
        flipper.pivot_y,
        flipper.angle,
        flipper.length,
    ) else {
        return false;
    };
    let reach = ball.radius + flipper.width;
    if hit.distance >= reach {
        return false;
    }
    let (x, y, _) = push_out(hit.closest_x, hit.closest_y, ball.x, ball.y, reach);
    let (dx, dy) = unit(flipper.angle);
    ball.x = x;
    ball.y = y;
    ball.vx = dx * kick_speed;
    ball.vy = dy * kick_speed;
    true
}

/// The ball has left through the open bottom edge.
pub fn is_drained(ball: &Ball, height: f32) -> bool {
    ball.y > height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::pinball::config::TableConfig;
    use crate::games::pinball::entities::{boundary_walls, FlipperSide};
    use crate::games::pinball::geometry::distance;

    const EPS: f32 = 1e-3;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        let mut ball = Ball::new(&TableConfig::classic());
        ball.x = x;
        ball.y = y;
        ball.vx = vx;
        ball.vy = vy;
        ball
    }

    #[test]
    fn test_left_wall_bounce() {
        let walls = boundary_walls(400.0, 600.0);
        let mut ball = ball_at(4.0, 300.0, -5.0, 1.0);
        assert!(resolve_wall(&mut ball, &walls[0], 0.8));
        assert_eq!(ball.x, ball.radius);
        assert!((ball.vx - 4.0).abs() < EPS);
        assert_eq!(ball.vy, 1.0);
    }

    #[test]
    fn test_right_wall_bounce() {
        let walls = boundary_walls(400.0, 600.0);
        let mut ball = ball_at(395.0, 300.0, 6.0, 0.0);
        assert!(resolve_wall(&mut ball, &walls[1], 0.8));
        assert!(400.0 - (ball.x + ball.radius) >= 0.0);
        assert!((ball.vx + 4.8).abs() < EPS);
    }

    #[test]
    fn test_top_wall_bounce() {
        let walls = boundary_walls(400.0, 600.0);
        let mut ball = ball_at(200.0, 3.0, 0.0, -7.5);
        assert!(resolve_wall(&mut ball, &walls[2], 0.8));
        assert_eq!(ball.y, ball.radius);
        assert!((ball.vy - 6.0).abs() < EPS);
    }

    #[test]
    fn test_wall_ignores_ball_in_bounds() {
        let walls = boundary_walls(400.0, 600.0);
        let mut ball = ball_at(200.0, 300.0, 3.0, 3.0);
        let before = ball.clone();
        for wall in &walls {
            assert!(!resolve_wall(&mut ball, wall, 0.8));
        }
        assert_eq!(ball, before);
    }

    #[test]
    fn test_no_floor_below_table() {
        let walls = boundary_walls(400.0, 600.0);
        let mut ball = ball_at(200.0, 650.0, 0.0, 5.0);
        for wall in &walls {
            assert!(!resolve_wall(&mut ball, wall, 0.8));
        }
        assert!(is_drained(&ball, 600.0));
    }

    #[test]
    fn test_bumper_kick_one_unit_inside() {
        let bumper = Bumper { x: 200.0, y: 270.0, radius: 30.0 };
        let angle: f32 = 0.7;
        let inside = 10.0 + 30.0 - 1.0;
        let mut ball = ball_at(
            200.0 + angle.cos() * inside,
            270.0 + angle.sin() * inside,
            -3.0,
            4.0,
        );
        assert!(resolve_bumper(&mut ball, &bumper, 8.0));
        assert!((distance(ball.x, ball.y, bumper.x, bumper.y) - 40.0).abs() < EPS);
        assert!((ball.speed() - 8.0).abs() < EPS);
        // Velocity points away from the bumper along the contact angle.
        assert!((ball.vy.atan2(ball.vx) - angle).abs() < EPS);
    }

    #[test]
    fn test_bumper_touching_is_not_overlap() {
        let bumper = Bumper { x: 100.0, y: 100.0, radius: 20.0 };
        let mut ball = ball_at(130.0, 100.0, 1.0, 1.0);
        assert!(!resolve_bumper(&mut ball, &bumper, 8.0));
        assert_eq!(ball.vx, 1.0);
    }

    #[test]
    fn test_flipper_kick_follows_flipper_angle() {
        let table = TableConfig::classic();
        let mut flipper = Flipper::new(FlipperSide::Left, &table);
        flipper.angle = flipper.active_angle;
        // Mid-flipper, just above its surface.
        let (ux, uy) = unit(flipper.angle);
        let (nx, ny) = (uy, -ux);
        let mid = flipper.length / 2.0;
        let mut ball = ball_at(
            flipper.pivot_x + ux * mid + nx * 12.0,
            flipper.pivot_y + uy * mid + ny * 12.0,
            0.0,
            6.0,
        );
        assert!(resolve_flipper(&mut ball, &flipper, 10.0));

        let hit = project_onto_segment(
            ball.x,
            ball.y,
            flipper.pivot_x,
            flipper.pivot_y,
            flipper.angle,
            flipper.length,
        )
        .unwrap();
        assert!((hit.distance - (ball.radius + flipper.width)).abs() < EPS);
        assert!((ball.vx - ux * 10.0).abs() < EPS);
        assert!((ball.vy - uy * 10.0).abs() < EPS);
    }

    #[test]
    fn test_flipper_ignores_ball_past_tip() {
        let table = TableConfig::classic();
        let flipper = Flipper::new(FlipperSide::Left, &table);
        let (tx, ty) = flipper.tip();
        let (ux, uy) = unit(flipper.angle);
        // Geometrically within reach of the rounded tip, but past the segment.
        let mut ball = ball_at(tx + ux * 5.0, ty + uy * 5.0, 0.0, 2.0);
        assert!(!resolve_flipper(&mut ball, &flipper, 10.0));
        assert_eq!(ball.vy, 2.0);
    }

    #[test]
    fn test_idle_flipper_still_deflects() {
        let table = TableConfig::classic();
        let flipper = Flipper::new(FlipperSide::Right, &table);
        assert!(!flipper.active);
        let (ux, uy) = unit(flipper.angle);
        let mut ball = ball_at(
            flipper.pivot_x + ux * 20.0,
            flipper.pivot_y + uy * 20.0 - 5.0,
            0.0,
            3.0,
        );
        assert!(resolve_flipper(&mut ball, &flipper, 10.0));
        assert!((ball.speed() - 10.0).abs() < EPS);
    }
}
