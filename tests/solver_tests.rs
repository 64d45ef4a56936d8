use approx::assert_relative_eq;
use impulse_physics::*;

fn kinetic_energy(bodies: &[RigidBody]) -> f32 {
    bodies
        .iter()
        .filter(|body| !body.has_infinite_mass())
        .map(|body| {
            let mass = body.mass_data().mass();
            let rotation = Mat3::from_quat(body.transform.rotation);
            let inertia = rotation * body.mass_data().inertia() * rotation.transpose();
            let omega = body.velocity.angular;
            0.5 * mass * body.velocity.linear.length_squared() + 0.5 * omega.dot(inertia * omega)
        })
        .sum()
}

fn inelastic(shape: Shape, position: Vec3, linear: Vec3, angular: Vec3) -> RigidBody {
    let mut body = RigidBody::with_transform(
        shape,
        Material::rock().with_restitution(0.0),
        Transform::from_position(position),
    );
    body.set_velocity(linear, angular);
    body
}

fn resolve_once(bodies: &mut Vec<RigidBody>, iterations: u32) -> usize {
    let mut data = CollisionData::new();
    NarrowPhase::collide(0, &bodies[0], 1, &bodies[1], &mut data);
    ContactResolver::new(iterations).resolve(&data.contacts, bodies, &mut DebugDrawList::disabled());
    data.point_count()
}

#[test]
fn head_on_inelastic_collision_does_not_gain_energy() {
    let mut bodies = vec![
        inelastic(Shape::sphere(0.5), Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO),
        inelastic(Shape::sphere(0.5), Vec3::new(0.95, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::ZERO),
    ];
    let before = kinetic_energy(&bodies);
    assert_eq!(resolve_once(&mut bodies, 1), 1);
    let after = kinetic_energy(&bodies);

    assert!(after <= before + 1e-5, "energy grew: {before} -> {after}");
    // Equal masses with e = 0 leave with the common velocity.
    assert_relative_eq!(bodies[0].velocity.linear.x, 0.5, epsilon = 1e-4);
    assert_relative_eq!(bodies[1].velocity.linear.x, 0.5, epsilon = 1e-4);
}

#[test]
fn glancing_spinning_collision_does_not_gain_energy() {
    let mut bodies = vec![
        inelastic(
            Shape::sphere(0.5),
            Vec3::ZERO,
            Vec3::new(3.0, 0.5, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
        ),
        inelastic(
            Shape::sphere(0.7),
            Vec3::new(0.8, 0.7, 0.1),
            Vec3::new(-1.0, 0.0, 0.5),
            Vec3::new(1.0, -2.0, 0.0),
        ),
    ];
    let before = kinetic_energy(&bodies);
    assert_eq!(resolve_once(&mut bodies, 1), 1);
    let after = kinetic_energy(&bodies);
    assert!(after <= before + 1e-4, "energy grew: {before} -> {after}");
}

#[test]
fn box_collision_does_not_gain_energy() {
    let mut bodies = vec![
        inelastic(Shape::cuboid(Vec3::splat(0.5)), Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0), Vec3::ZERO),
        inelastic(
            Shape::cuboid(Vec3::new(0.5, 0.3, 0.4)),
            Vec3::new(0.9, 0.2, 0.0),
            Vec3::new(-1.5, 0.0, 0.0),
            Vec3::ZERO,
        ),
    ];
    let before = kinetic_energy(&bodies);
    assert!(resolve_once(&mut bodies, 1) > 0);
    let after = kinetic_energy(&bodies);
    assert!(after <= before + 1e-4, "energy grew: {before} -> {after}");
}

#[test]
fn more_iterations_still_do_not_gain_energy() {
    let mut bodies = vec![
        inelastic(Shape::sphere(0.5), Vec3::ZERO, Vec3::new(2.0, 0.3, 0.0), Vec3::ZERO),
        inelastic(Shape::sphere(0.5), Vec3::new(0.9, 0.2, 0.0), Vec3::new(-2.0, 0.0, 0.0), Vec3::ZERO),
    ];
    let before = kinetic_energy(&bodies);
    resolve_once(&mut bodies, 8);
    let after = kinetic_energy(&bodies);
    assert!(after <= before + 1e-4, "energy grew: {before} -> {after}");
}

#[test]
fn static_bodies_are_never_moved_by_contacts() {
    let ground = RigidBody::new(Shape::plane(Vec3::Y, 0.0), Material::static_surface());
    let ball = inelastic(Shape::sphere(0.5), Vec3::new(0.0, 0.3, 0.0), Vec3::new(1.0, -3.0, 0.0), Vec3::ZERO);
    let mut bodies = vec![ground, ball];

    resolve_once(&mut bodies, 1);

    assert_eq!(bodies[0].velocity, Velocity::default());
    assert_eq!(bodies[0].transform, Transform::default());
    assert!(bodies[1].velocity.linear.y >= -1e-5);
    assert_relative_eq!(bodies[1].position().y, 0.5, epsilon = 1e-4);
}
