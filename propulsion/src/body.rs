use serde::{Deserialize, Serialize};

use crate::math::{yaw_of, Quatf, Vec3f, BODY_FWD, BODY_RIGHT, BODY_UP, SMALL_NUMBER};

/// The physics body the controllers push on.
///
/// Forces and torques are in the engine's native unit (see
/// [`ForceUnit`](crate::ForceUnit)). Angular velocity is in rad/s; only its
/// +Z (yaw) component is read by the controllers.
pub trait RigidBody {
    /// `false` while the host is not stepping this body; the tick is skipped.
    fn is_simulating(&self) -> bool {
        true
    }
    fn position(&self) -> Vec3f;
    /// Body-to-world rotation.
    fn orientation(&self) -> Quatf;
    fn linear_velocity(&self) -> Vec3f;
    fn angular_velocity(&self) -> Vec3f;
    fn mass(&self) -> f32;
    /// Largest principal moment of inertia, used as a scalar for yaw.
    fn inertia_principal_max(&self) -> f32;

    fn apply_force(&mut self, force: Vec3f, world_space: bool);
    /// Force applied at a world-space point. Bodies without off-centre support
    /// fall back to a central force.
    fn apply_force_at_point(&mut self, force: Vec3f, point: Vec3f) {
        let _ = point;
        self.apply_force(force, true);
    }
    fn apply_torque(&mut self, torque: Vec3f, world_space: bool);
    fn set_linear_velocity(&mut self, velocity: Vec3f);
    fn set_angular_velocity(&mut self, angular_velocity: Vec3f);

    fn forward(&self) -> Vec3f {
        self.orientation() * BODY_FWD
    }
    fn right(&self) -> Vec3f {
        self.orientation() * BODY_RIGHT
    }
    fn up(&self) -> Vec3f {
        self.orientation() * BODY_UP
    }
}

/// Minimal free rigid body with force/torque accumulators.
///
/// Integration is semi-implicit Euler: velocities first, then position and
/// orientation from the new velocities. Used by the sandbox and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleBody {
    pub position: Vec3f,
    pub velocity: Vec3f,
    pub orientation: Quatf,
    /// World-frame angular velocity (rad/s).
    pub angular_velocity: Vec3f,
    pub mass: f32,
    /// Principal moments about body X, Y, Z (kg·m²).
    pub inertia: Vec3f,
    #[serde(default = "default_simulating")]
    pub simulating: bool,
    #[serde(skip)]
    force: Vec3f,
    #[serde(skip)]
    torque: Vec3f,
}

fn default_simulating() -> bool {
    true
}

impl SimpleBody {
    pub fn new(mass: f32, inertia: Vec3f) -> Self {
        Self {
            position: Vec3f::ZERO,
            velocity: Vec3f::ZERO,
            orientation: Quatf::IDENTITY,
            angular_velocity: Vec3f::ZERO,
            mass,
            inertia,
            simulating: true,
            force: Vec3f::ZERO,
            torque: Vec3f::ZERO,
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.orientation = Quatf::from_rotation_z(yaw);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3f) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_yaw_rate(mut self, yaw_rate: f32) -> Self {
        self.angular_velocity = Vec3f::new(0.0, 0.0, yaw_rate);
        self
    }

    pub fn yaw(&self) -> f32 {
        yaw_of(self.orientation)
    }

    pub fn yaw_rate(&self) -> f32 {
        self.angular_velocity.z
    }

    /// World-space force accumulated since the last step.
    pub fn pending_force(&self) -> Vec3f {
        self.force
    }

    /// World-space torque accumulated since the last step.
    pub fn pending_torque(&self) -> Vec3f {
        self.torque
    }

    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        if self.simulating {
            let inv_mass = if self.mass > SMALL_NUMBER { self.mass.recip() } else { 0.0 };
            self.velocity += self.force * (inv_mass * dt);
            self.position += self.velocity * dt;

            // Angular acceleration per principal axis, solved in the body frame.
            let torque_body = self.orientation.inverse() * self.torque;
            let inv = |i: f32| if i > SMALL_NUMBER { i.recip() } else { 0.0 };
            let alpha_body = Vec3f::new(
                torque_body.x * inv(self.inertia.x),
                torque_body.y * inv(self.inertia.y),
                torque_body.z * inv(self.inertia.z),
            );
            self.angular_velocity += (self.orientation * alpha_body) * dt;
            let spin = Quatf::from_scaled_axis(self.angular_velocity * dt);
            self.orientation = (spin * self.orientation).normalize();
        }
        self.force = Vec3f::ZERO;
        self.torque = Vec3f::ZERO;
    }
}

impl RigidBody for SimpleBody {
    fn is_simulating(&self) -> bool {
        self.simulating
    }
    fn position(&self) -> Vec3f {
        self.position
    }
    fn orientation(&self) -> Quatf {
        self.orientation
    }
    fn linear_velocity(&self) -> Vec3f {
        self.velocity
    }
    fn angular_velocity(&self) -> Vec3f {
        self.angular_velocity
    }
    fn mass(&self) -> f32 {
        self.mass
    }
    fn inertia_principal_max(&self) -> f32 {
        self.inertia.max_element()
    }

    fn apply_force(&mut self, force: Vec3f, world_space: bool) {
        self.force += if world_space { force } else { self.orientation * force };
    }

    fn apply_force_at_point(&mut self, force: Vec3f, point: Vec3f) {
        self.force += force;
        self.torque += (point - self.position).cross(force);
    }

    fn apply_torque(&mut self, torque: Vec3f, world_space: bool) {
        self.torque += if world_space { torque } else { self.orientation * torque };
    }

    fn set_linear_velocity(&mut self, velocity: Vec3f) {
        self.velocity = velocity;
    }

    fn set_angular_velocity(&mut self, angular_velocity: Vec3f) {
        self.angular_velocity = angular_velocity;
    }
}
