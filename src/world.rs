use std::time::Instant;

use glam::Vec3;

use crate::{
    collision::{
        broadphase::{BroadPhase, SphereBroadPhase},
        contact::CollisionData,
        narrowphase::NarrowPhase,
    },
    config::WorldConfig,
    core::rigidbody::{BodyId, RigidBody},
    debug::{DebugColor, DebugDrawList},
    dynamics::{integrator::Integrator, sleep::SleepPolicy, solver::ContactResolver},
    utils::profiling::{ScopedTimer, StepProfile},
};

/// Radius of the marker drawn at each contact point.
const CONTACT_DRAW_RADIUS: f32 = 0.05;

/// Summary of one [`PhysicsWorld::step`].
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    pub pair_count: usize,
    pub contact_count: usize,
    pub contact_point_count: usize,
    pub integrated: usize,
    pub fell_asleep: usize,
    pub profile: StepProfile,
    pub draws: DebugDrawList,
}

/// Central simulation container: owns the bodies and runs the fixed-step pipeline.
///
/// Bodies are addressed by [`BodyId`]; contacts refer to their position in the
/// body list, which keeps insertion order.
pub struct PhysicsWorld {
    bodies: Vec<RigidBody>,
    broadphase: Box<dyn BroadPhase>,
    gravity: Vec3,
    extents: Vec3,
    resolver: ContactResolver,
    integrator: Integrator,
    sleep: SleepPolicy,
    config: WorldConfig,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            bodies: Vec::new(),
            broadphase: Box::new(SphereBroadPhase::new()),
            gravity: config.gravity,
            extents: config.extents,
            resolver: ContactResolver::new(config.solver_iterations),
            integrator: Integrator::new(config.velocity_damping),
            sleep: SleepPolicy::default(),
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    /// Half-size of the simulated volume, used to size plane bounds.
    pub fn extents(&self) -> Vec3 {
        self.extents
    }

    pub fn set_debug_draw(&mut self, enabled: bool) {
        self.config.debug_draw = enabled;
    }

    pub fn set_broadphase<B>(&mut self, broadphase: B)
    where
        B: BroadPhase + 'static,
    {
        self.broadphase = Box::new(broadphase);
    }

    pub fn add_body(&mut self, mut body: RigidBody) -> BodyId {
        body.update_transforms();
        let id = body.id();
        log::debug!("adding {id} ({:?})", body.shape().kind());
        self.bodies.push(body);
        id
    }

    /// Detaches a body, keeping the relative order of the others.
    pub fn remove_body(&mut self, id: BodyId) -> Option<RigidBody> {
        let index = self.index_of(id)?;
        log::debug!("removing {id}");
        Some(self.bodies.remove(index))
    }

    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|body| body.id() == id)
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.iter().find(|body| body.id() == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.iter_mut().find(|body| body.id() == id)
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Runs broad and narrow phase on the current state without advancing time.
    pub fn collect_contacts(&mut self) -> CollisionData {
        for body in &mut self.bodies {
            body.update_transforms();
        }
        let pairs = self.broadphase.generate_pairs(&self.bodies, self.extents);
        let mut data = CollisionData::new();
        for pair in &pairs {
            NarrowPhase::collide(pair.a, &self.bodies[pair.a], pair.b, &self.bodies[pair.b], &mut data);
        }
        data
    }

    /// Advances the simulation by exactly `dt` seconds.
    ///
    /// `dt` is used as given; callers bound it (see [`crate::PhysicsEngine`]).
    pub fn step(&mut self, dt: f32) -> StepReport {
        let started = Instant::now();
        let mut profile = StepProfile {
            body_count: self.bodies.len(),
            ..StepProfile::default()
        };
        let mut draws = if self.config.debug_draw {
            DebugDrawList::new(self.config.max_debug_draws)
        } else {
            DebugDrawList::disabled()
        };

        for body in &mut self.bodies {
            body.update_transforms();
        }

        let pairs = {
            let _timer = ScopedTimer::new("broadphase::pairs", &mut profile.broad_phase_time);
            self.broadphase.generate_pairs(&self.bodies, self.extents)
        };

        let mut collisions = CollisionData::new();
        {
            let _timer = ScopedTimer::new("narrowphase::collide", &mut profile.narrow_phase_time);
            for pair in &pairs {
                NarrowPhase::collide(
                    pair.a,
                    &self.bodies[pair.a],
                    pair.b,
                    &self.bodies[pair.b],
                    &mut collisions,
                );
            }
        }

        if draws.is_enabled() {
            for contact in collisions.iter() {
                for point in contact.points() {
                    draws.sphere(point.point, CONTACT_DRAW_RADIUS, true, DebugColor::Red);
                }
            }
        }

        {
            let _timer = ScopedTimer::new("solver::resolve", &mut profile.solver_time);
            self.resolver
                .resolve(&collisions.contacts, &mut self.bodies, &mut draws);
        }

        let mut integrated = 0;
        let mut fell_asleep = 0;
        {
            let _timer = ScopedTimer::new("integrator::step", &mut profile.integrator_time);
            for body in &mut self.bodies {
                if !self.integrator.integrate(body, self.gravity, dt) {
                    continue;
                }
                integrated += 1;

                if self.config.allow_sleep && self.sleep.update(body, dt) {
                    fell_asleep += 1;
                }

                if draws.is_enabled() {
                    let bounds = body.bounding_sphere(self.extents);
                    let color = if body.is_awake() {
                        DebugColor::Green
                    } else {
                        DebugColor::Yellow
                    };
                    draws.sphere(bounds.center, bounds.radius, true, color);
                }
            }
        }

        for body in &mut self.bodies {
            body.update_transforms();
        }

        profile.pair_count = pairs.len();
        profile.contact_count = collisions.len();
        profile.awake_count = self.bodies.iter().filter(|body| body.is_awake()).count();
        profile.total_time = started.elapsed();
        profile.report();

        StepReport {
            pair_count: pairs.len(),
            contact_count: collisions.len(),
            contact_point_count: collisions.point_count(),
            integrated,
            fell_asleep,
            profile,
            draws,
        }
    }
}
