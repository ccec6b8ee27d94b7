//! Orbit camera.
//!
//! Spherical coordinates around a target point, with damped rotation the way
//! orbit controls behave in the browser: input accumulates as pending deltas
//! and `update()` applies a fraction of them each frame.

use std::f32::consts::PI;

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::Ray;

const POLAR_EPSILON: f32 = 1e-4;
const SETTLED: f32 = 1e-6;

/// Camera settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Fraction of pending rotation applied per update; 1.0 disables damping.
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [15.0, 15.0, 15.0],
            target: [0.0, 0.0, 0.0],
            damping_factor: 0.05,
            min_distance: 1.0,
            max_distance: 500.0,
        }
    }
}

/// Perspective camera orbiting a target.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    config: CameraConfig,
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    aspect: f32,
    pending_rotation: Vec2,
    pending_scale: f32,
}

impl OrbitCamera {
    pub fn new(config: CameraConfig, aspect: f32) -> Self {
        let target = Vec3::from_array(config.target);
        let offset = Vec3::from_array(config.position) - target;
        let radius = offset
            .length()
            .clamp(config.min_distance, config.max_distance);
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .acos();

        Self {
            config,
            target,
            radius,
            theta,
            phi: phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON),
            aspect: sanitize_aspect(aspect),
            pending_rotation: Vec2::ZERO,
            pending_scale: 1.0,
        }
    }

    /// Queue a rotation in radians (azimuth, polar).
    pub fn orbit(&mut self, delta_theta: f32, delta_phi: f32) {
        self.pending_rotation += Vec2::new(delta_theta, delta_phi);
    }

    /// Queue a distance change; `factor > 1` moves away from the target.
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.pending_scale *= factor;
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.aspect = sanitize_aspect(width / height);
    }

    /// Apply pending input. Returns true while the camera is still moving.
    pub fn update(&mut self) -> bool {
        let damping = self.config.damping_factor.clamp(f32::EPSILON, 1.0);
        let step = self.pending_rotation * damping;
        self.theta += step.x;
        self.phi = (self.phi + step.y).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.pending_rotation -= step;
        if self.pending_rotation.length_squared() < SETTLED * SETTLED {
            self.pending_rotation = Vec2::ZERO;
        }

        let zoomed = (self.pending_scale - 1.0).abs() > SETTLED;
        self.radius = (self.radius * self.pending_scale)
            .clamp(self.config.min_distance, self.config.max_distance);
        self.pending_scale = 1.0;

        zoomed || step.length_squared() > 0.0
    }

    pub fn position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target + Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta) * self.radius
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// WebGL clip space (z in -1..1).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.config.fov_degrees.to_radians(),
            self.aspect,
            self.config.near,
            self.config.far,
        )
    }

    /// Ray through a point in normalized device coordinates (-1..1, +Y up).
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> Option<Ray> {
        let inverse = (self.projection_matrix() * self.view_matrix()).inverse();
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, -1.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Ray::new(near, far - near)
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
