use impulse_physics::*;

fn main() {
    let mut objects = vec![SceneObject::plane(Vec3::ZERO, Vec3::Y)];
    for i in 0..5 {
        objects.push(SceneObject::cuboid(
            Vec3::new(0.0, i as f32 + 0.5, 0.0),
            Vec3::splat(0.5),
            MaterialPreset::Wood,
        ));
    }
    let scene = SceneDescription {
        gravity: None,
        objects,
    };

    let mut world = PhysicsWorld::with_config(WorldConfig::default().with_solver_iterations(4));
    let ids = match load_scene(&mut world, &scene) {
        Ok(ids) => ids,
        Err(err) => {
            eprintln!("failed to load scene: {err}");
            return;
        }
    };

    for _ in 0..200 {
        world.step(1.0 / 100.0);
    }

    println!("Simulated stack of boxes for 2 seconds");
    for id in &ids[1..] {
        if let Some(body) = world.body(*id) {
            println!("{id}: {:?} awake={}", body.position(), body.is_awake());
        }
    }
}
