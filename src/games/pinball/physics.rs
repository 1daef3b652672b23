use super::entities::{Ball, Flipper};

/// Advances the ball one step: gravity, then friction, then position.
pub fn integrate_ball(ball: &mut Ball) {
    ball.vy += ball.gravity;
    ball.vx *= ball.friction;
    ball.vy *= ball.friction;

    ball.x += ball.vx;
    ball.y += ball.vy;
}

/// Moves `current` toward `target` by at most `speed`, landing on the
/// target instead of crossing it.
pub fn approach_angle(current: f32, target: f32, speed: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= speed {
        target
    } else {
        current + speed * delta.signum()
    }
}

pub fn update_flipper(flipper: &mut Flipper) {
    flipper.angle = approach_angle(flipper.angle, flipper.target_angle(), flipper.rotation_speed);
}
