use crate::Ball;
use hecs::World;

/// Move ball by one tick of velocity
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos += ball.vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, Config};
    use glam::Vec2;

    #[test]
    fn test_ball_moves_by_velocity() {
        let mut world = World::new();
        let config = Config::new();
        let ball = create_ball(&mut world, &config, Vec2::new(100.0, 100.0), Vec2::new(5.0, -2.0));

        move_ball(&mut world);
        move_ball(&mut world);

        let pos = world.get::<&Ball>(ball).map(|b| b.pos).unwrap_or(Vec2::NAN);
        assert_eq!(pos, Vec2::new(110.0, 96.0));
    }
}
