use impulse_physics::*;
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn world_and_engine_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PhysicsWorld>();
    assert_send_sync::<PhysicsEngine>();
    assert_send_sync::<RigidBody>();
    assert_send_sync::<CollisionData>();
}

#[test]
fn shared_world_steps_from_several_threads() {
    let mut world = PhysicsWorld::new();
    world.add_body(RigidBody::new(Shape::plane(Vec3::Y, 0.0), Material::static_surface()));
    let ball = world.add_body(RigidBody::with_transform(
        Shape::sphere(0.5),
        Material::rubber(),
        Transform::from_position(Vec3::new(0.0, 3.0, 0.0)),
    ));
    let world = Arc::new(Mutex::new(world));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let world = Arc::clone(&world);
            thread::spawn(move || {
                for _ in 0..25 {
                    world.lock().expect("world lock poisoned").step(0.01);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("stepping thread panicked");
    }

    let world = world.lock().expect("world lock poisoned");
    let y = world.body(ball).expect("ball").position().y;
    assert!(y < 3.0 && y > 0.0, "ball at {y}");
}

#[test]
fn independent_worlds_step_in_parallel_identically() {
    let build = || {
        let mut engine = PhysicsEngine::new(0.01);
        engine.add_body(RigidBody::new(Shape::plane(Vec3::Y, 0.0), Material::static_surface()));
        engine.add_body(RigidBody::with_transform(
            Shape::cuboid(Vec3::splat(0.5)),
            Material::metal(),
            Transform::new(Vec3::new(0.0, 2.0, 0.0), Quat::from_rotation_x(0.5)),
        ));
        engine
    };

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let mut engine = build();
            thread::spawn(move || {
                for _ in 0..100 {
                    engine.step();
                }
                engine.world().bodies()[1].transform
            })
        })
        .collect();

    let results: Vec<Transform> = handles
        .into_iter()
        .map(|h| h.join().expect("stepping thread panicked"))
        .collect();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}
