//! Ball integration: motion, frame-rate independent friction, speed cap and
//! elastic wall bounces.

use super::geometry::PitchGeometry;
use super::state::Ball;

/// Advance the ball by `dt` nominal frames
pub fn step_ball(ball: &mut Ball, geometry: &PitchGeometry, friction: f32, max_speed: f32, dt: f32) {
    ball.pos += ball.vel * dt;
    ball.vel *= friction.powf(dt);
    ball.vel = ball.vel.clamp_length_max(max_speed.max(0.0));
    bounce_walls(ball, geometry);
}

/// Clamp the ball inside the padded bounds, inverting the velocity component
/// of every wall it crossed. Returns true on any bounce.
pub fn bounce_walls(ball: &mut Ball, geometry: &PitchGeometry) -> bool {
    let (left, right) = geometry.ball_x_range(ball.radius);
    let (top, bottom) = geometry.y_range(ball.radius);
    let mut bounced = false;

    if ball.pos.y < top {
        ball.pos.y = top;
        ball.vel.y = ball.vel.y.abs();
        bounced = true;
    }
    if ball.pos.y > bottom {
        ball.pos.y = bottom;
        ball.vel.y = -ball.vel.y.abs();
        bounced = true;
    }
    if ball.pos.x < left {
        ball.pos.x = left;
        ball.vel.x = ball.vel.x.abs();
        bounced = true;
    }
    if ball.pos.x > right {
        ball.pos.x = right;
        ball.vel.x = -ball.vel.x.abs();
        bounced = true;
    }

    // Inverted bounds on a collapsed pitch: pin to the clamp midpoint
    if left > right || top > bottom {
        ball.pos = geometry.clamp_ball(ball.pos, ball.radius);
    }
    bounced
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn pitch() -> PitchGeometry {
        PitchGeometry::new(800.0, 450.0)
    }

    #[test]
    fn test_friction_is_frame_rate_independent() {
        let g = pitch();
        let mut one = Ball::new(g.center());
        one.vel = Vec2::new(8.0, 0.0);
        let mut two = one;

        step_ball(&mut one, &g, 0.9966, 100.0, 1.0);
        step_ball(&mut one, &g, 0.9966, 100.0, 1.0);
        two.pos = g.center();
        step_ball(&mut two, &g, 0.9966, 100.0, 2.0);

        assert!((one.vel.x - two.vel.x).abs() < 1e-4);
    }

    #[test]
    fn test_speed_is_capped() {
        let g = pitch();
        let mut ball = Ball::new(g.center());
        ball.vel = Vec2::new(30.0, 40.0);
        step_ball(&mut ball, &g, 1.0, 12.0, 1.0);
        assert!(ball.speed() <= 12.0 + 1e-4);
    }

    #[test]
    fn test_wall_bounce_is_elastic_and_clamped() {
        let g = pitch();
        let mut ball = Ball::new(Vec2::new(400.0, 20.0));
        ball.vel = Vec2::new(3.0, -10.0);
        step_ball(&mut ball, &g, 1.0, 100.0, 1.0);

        assert_eq!(ball.pos.y, g.padding + ball.radius);
        assert_eq!(ball.vel, Vec2::new(3.0, 10.0));
    }

    #[test]
    fn test_right_wall_bounce() {
        let g = pitch();
        let mut ball = Ball::new(Vec2::new(770.0, 60.0));
        ball.vel = Vec2::new(9.0, 0.0);
        step_ball(&mut ball, &g, 1.0, 100.0, 1.0);
        assert!(ball.vel.x < 0.0);
        assert_eq!(ball.pos.x, 800.0 - g.padding - ball.radius);
    }
}
