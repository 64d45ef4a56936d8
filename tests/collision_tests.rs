use approx::assert_relative_eq;
use impulse_physics::*;

fn body_at(shape: Shape, position: Vec3, rotation: Quat) -> RigidBody {
    RigidBody::with_transform(shape, Material::rock(), Transform::new(position, rotation))
}

fn collide(a: &RigidBody, b: &RigidBody) -> CollisionData {
    let mut data = CollisionData::new();
    NarrowPhase::collide(0, a, 1, b, &mut data);
    data
}

/// Deterministic rotations for sweeping box orientations.
struct Lcg(u64);

impl Lcg {
    fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32) / ((1u64 << 24) as f32)
    }

    fn rotation(&mut self) -> Quat {
        let axis = Vec3::new(
            self.next_f32() - 0.5,
            self.next_f32() - 0.5,
            self.next_f32() - 0.5,
        )
        .try_normalize()
        .unwrap_or(Vec3::Y);
        Quat::from_axis_angle(axis, self.next_f32() * std::f32::consts::TAU)
    }
}

fn x_extent(half_extents: Vec3, rotation: Quat) -> f32 {
    let mut extent = 0.0f32;
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                let corner = rotation * (half_extents * Vec3::new(sx, sy, sz));
                extent = extent.max(corner.x);
            }
        }
    }
    extent
}

#[test]
fn sphere_pair_penetration_matches_distance() {
    for &(r1, r2, d) in &[(1.0, 1.0, 1.5), (0.5, 0.25, 0.7), (2.0, 0.5, 0.1)] {
        let a = body_at(Shape::sphere(r1), Vec3::ZERO, Quat::IDENTITY);
        let direction = Vec3::new(1.0, 2.0, -0.5).normalize();
        let b = body_at(Shape::sphere(r2), direction * d, Quat::IDENTITY);

        let data = collide(&a, &b);
        assert_eq!(data.point_count(), 1, "r1={r1} r2={r2} d={d}");
        let point = data.contacts[0].points()[0];
        assert_relative_eq!(point.penetration, r1 + r2 - d, epsilon = 1e-5);
        assert_relative_eq!(point.normal.dot(direction), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn sphere_pair_at_or_beyond_contact_distance_is_separate() {
    let a = body_at(Shape::sphere(1.0), Vec3::ZERO, Quat::IDENTITY);
    for d in [2.0, 2.5, 10.0] {
        let b = body_at(Shape::sphere(1.0), Vec3::new(0.0, 0.0, d), Quat::IDENTITY);
        assert!(collide(&a, &b).is_empty(), "d = {d}");
    }
}

#[test]
fn box_pair_separated_along_x_never_collides() {
    let mut rng = Lcg(0x5eed);
    let half_a = Vec3::new(0.5, 0.75, 0.3);
    let half_b = Vec3::new(0.4, 0.2, 0.9);

    for _ in 0..200 {
        let rotation_a = rng.rotation();
        let rotation_b = rng.rotation();
        let gap = 0.01 + rng.next_f32() * 0.1;
        let offset = x_extent(half_a, rotation_a) + x_extent(half_b, rotation_b) + gap;
        let lateral = Vec3::new(0.0, rng.next_f32() - 0.5, rng.next_f32() - 0.5);

        let a = body_at(Shape::cuboid(half_a), Vec3::ZERO, rotation_a);
        let b = body_at(
            Shape::cuboid(half_b),
            Vec3::new(offset, 0.0, 0.0) + lateral,
            rotation_b,
        );
        assert!(
            collide(&a, &b).is_empty(),
            "separated boxes reported contact: {rotation_a:?} {rotation_b:?}"
        );
    }
}

#[test]
fn box_pair_overlapping_always_collides() {
    let mut rng = Lcg(0xb0c5);
    for _ in 0..100 {
        let a = body_at(Shape::cuboid(Vec3::splat(0.5)), Vec3::ZERO, rng.rotation());
        let offset = Vec3::new(
            rng.next_f32() - 0.5,
            rng.next_f32() - 0.5,
            rng.next_f32() - 0.5,
        ) * 0.8;
        let b = body_at(Shape::cuboid(Vec3::splat(0.5)), offset, rng.rotation());

        let data = collide(&a, &b);
        assert_eq!(data.point_count(), 1);
        let point = data.contacts[0].points()[0];
        assert!(point.penetration > 0.0);
        assert_relative_eq!(point.normal.length(), 1.0, epsilon = 1e-4);
        // Normal points from A toward B.
        assert!(point.normal.dot(offset) >= -1e-4);
    }
}

#[test]
fn face_touching_cubes_have_zero_penetration() {
    let a = body_at(Shape::cuboid(Vec3::splat(0.5)), Vec3::ZERO, Quat::IDENTITY);
    let b = body_at(
        Shape::cuboid(Vec3::splat(0.5)),
        Vec3::new(1.0, 0.0, 0.0),
        Quat::IDENTITY,
    );

    let data = collide(&a, &b);
    assert_eq!(data.point_count(), 1);
    for contact in data.iter() {
        for point in contact.points() {
            assert_eq!(point.penetration, 0.0);
        }
    }
}

#[test]
fn reversed_operands_negate_normals() {
    let cube = body_at(Shape::cuboid(Vec3::splat(0.5)), Vec3::new(0.0, 0.4, 0.0), Quat::IDENTITY);
    let ball = body_at(Shape::sphere(0.5), Vec3::new(0.3, 1.2, 0.1), Quat::IDENTITY);
    let low_ball = body_at(Shape::sphere(0.5), Vec3::new(2.0, 0.3, 0.0), Quat::IDENTITY);
    let ground = RigidBody::new(Shape::plane(Vec3::Y, 0.0), Material::static_surface());

    let pairs: [(&RigidBody, &RigidBody); 3] =
        [(&cube, &ball), (&cube, &ground), (&low_ball, &ground)];
    for (a, b) in pairs {
        let forward = collide(a, b);
        let backward = collide(b, a);
        assert_eq!(forward.point_count(), backward.point_count());
        for (f, r) in forward.contacts[0]
            .points()
            .iter()
            .zip(backward.contacts[0].points())
        {
            assert_relative_eq!(f.penetration, r.penetration, epsilon = 1e-6);
            assert_relative_eq!((f.normal + r.normal).length(), 0.0, epsilon = 1e-6);
        }
    }
}

#[test]
fn box_pair_order_flips_normal() {
    let a = body_at(Shape::cuboid(Vec3::splat(0.5)), Vec3::ZERO, Quat::IDENTITY);
    let b = body_at(
        Shape::cuboid(Vec3::splat(0.5)),
        Vec3::new(0.9, 0.1, 0.0),
        Quat::IDENTITY,
    );

    let forward = collide(&a, &b).contacts[0].points()[0];
    let backward = collide(&b, &a).contacts[0].points()[0];
    assert_relative_eq!(forward.penetration, 0.1, epsilon = 1e-5);
    assert_relative_eq!(backward.penetration, 0.1, epsilon = 1e-5);
    assert_relative_eq!(forward.normal.x, 1.0);
    assert_relative_eq!(backward.normal.x, -1.0);
}

#[test]
fn broad_phase_never_misses_narrow_phase_contacts() {
    let mut rng = Lcg(42);
    let mut bodies = Vec::new();
    for i in 0..30 {
        let position = Vec3::new(
            rng.next_f32() * 4.0,
            rng.next_f32() * 4.0,
            rng.next_f32() * 4.0,
        );
        let shape = if i % 2 == 0 {
            Shape::sphere(0.3 + rng.next_f32() * 0.4)
        } else {
            Shape::cuboid(Vec3::splat(0.2 + rng.next_f32() * 0.4))
        };
        bodies.push(body_at(shape, position, rng.rotation()));
    }

    let pairs = SphereBroadPhase::new().generate_pairs(&bodies, Vec3::splat(500.0));
    for i in 0..bodies.len() {
        for j in i + 1..bodies.len() {
            let mut data = CollisionData::new();
            if NarrowPhase::collide(i, &bodies[i], j, &bodies[j], &mut data) > 0 {
                assert!(pairs.contains(&BodyPair { a: i, b: j }), "missed pair ({i}, {j})");
            }
        }
    }
}
