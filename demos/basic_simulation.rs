use impulse_physics::*;

fn main() {
    let mut engine = PhysicsEngine::new(1.0 / 100.0);

    engine.add_body(RigidBody::new(
        Shape::plane(Vec3::Y, 0.0),
        Material::static_surface(),
    ));
    let ball = engine.add_body(RigidBody::with_transform(
        Shape::sphere(0.5),
        Material::rubber(),
        Transform::from_position(Vec3::new(0.0, 5.0, 0.0)),
    ));

    // Sixty frames per second of wall time, stepped at a fixed 100 Hz.
    for frame in 0..300 {
        engine.advance(1.0 / 60.0);
        if frame % 30 == 0 {
            if let Some(body) = engine.body(ball) {
                println!(
                    "t={:.2}s ball y={:.3} awake={}",
                    frame as f32 / 60.0,
                    body.position().y,
                    body.is_awake()
                );
            }
        }
    }
}
