//! 3D scene state for the starfield and the manager that owns its loop.

use glam::{Mat4, Quat, Vec3};
use instant::Instant;
use rand::prelude::*;
use std::time::Duration;

use super::error::VizError;
use super::reactive::{elapsed_between, ReactiveParam};
use super::surface::SurfaceMetrics;
use crate::constants::*;

/// Start/stop timer driving frame-rate independent animation.
#[derive(Clone, Debug, Default)]
pub struct SceneClock {
    started_at: Option<Instant>,
    elapsed_at_stop: Duration,
}

impl SceneClock {
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.elapsed_at_stop = Duration::ZERO;
    }

    pub fn stop(&mut self, now: Instant) {
        self.elapsed_at_stop = self.elapsed(now);
        self.started_at = None;
    }

    pub fn running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Time since `start`; frozen once stopped.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(t0) => elapsed_between(t0, now),
            None => self.elapsed_at_stop,
        }
    }
}

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub size: f32,
    pub tint: [f32; 3],
}

/// Stars scattered in a spherical shell around the camera. The whole field
/// turns slowly and drifts toward the viewer, wrapping at the near side.
pub struct Starfield {
    base: Vec<Star>,
    drift: f32,
    rotation: f32,
}

impl Starfield {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let base = (0..count)
            .map(|_| {
                let dir = loop {
                    let v = Vec3::new(
                        rng.gen_range(-1.0..1.0),
                        rng.gen_range(-1.0..1.0),
                        rng.gen_range(-1.0..1.0),
                    );
                    let len2 = v.length_squared();
                    if len2 > 1e-4 && len2 <= 1.0 {
                        break v / len2.sqrt();
                    }
                };
                let radius = rng.gen_range(STARFIELD_INNER_RADIUS..STARFIELD_RADIUS);
                let warm: f32 = rng.gen_range(0.0..1.0);
                Star {
                    position: dir * radius,
                    size: rng.gen_range(STAR_SIZE_MIN..STAR_SIZE_MAX),
                    tint: [0.8 + 0.2 * warm, 0.85, 1.0 - 0.2 * warm],
                }
            })
            .collect();
        Self {
            base,
            drift: 0.0,
            rotation: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn advance(&mut self, elapsed: Duration) {
        let t = elapsed.as_secs_f32();
        self.rotation = (t * STAR_ROTATION_PER_SEC) % std::f32::consts::TAU;
        self.drift = (t * STAR_DRIFT_PER_SEC) % (STARFIELD_RADIUS * 2.0);
    }

    /// World-space stars for the current rotation/drift.
    pub fn instances(&self) -> impl Iterator<Item = Star> + '_ {
        let rot = Quat::from_rotation_y(self.rotation);
        let span = STARFIELD_RADIUS * 2.0;
        let drift = self.drift;
        self.base.iter().map(move |s| {
            let mut p = rot * s.position;
            p.z += drift;
            if p.z > STARFIELD_RADIUS {
                p.z -= span;
            }
            Star { position: p, ..*s }
        })
    }
}

/// Everything a renderer needs to draw one frame.
pub struct SceneFrame<'a> {
    pub view: Mat4,
    pub view_proj: Mat4,
    pub camera_eye: Vec3,
    pub light: &'a DirectionalLight,
    pub stars: &'a [Star],
    pub time: f32,
}

/// GPU-side half of the scene: owns the rendering context and its surface.
pub trait SceneRenderer {
    fn resize(&mut self, width: u32, height: u32);
    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), VizError>;
    /// Free GPU resources and detach the surface from the page.
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Owns the 3D scene, its render loop state and teardown.
///
/// `animate` marks the loop running; the platform calls `step` once per
/// animation frame and schedules the next frame only while `step` returns
/// `Ok(true)`. `cleanup` ends the loop and releases the renderer.
pub struct SceneManager<R: SceneRenderer> {
    pub clock: SceneClock,
    pub camera: Camera,
    light: DirectionalLight,
    starfield: Starfield,
    renderer: Option<R>,
    state: LoopState,
    scratch: Vec<Star>,
    frames: u64,
}

impl<R: SceneRenderer> SceneManager<R> {
    pub fn new(mut renderer: R, metrics: SurfaceMetrics, star_count: usize, initial_light: f32) -> Self {
        let (w, h) = metrics.backing_size();
        renderer.resize(w, h);
        Self {
            clock: SceneClock::default(),
            camera: Camera::new(metrics.aspect()),
            light: DirectionalLight {
                direction: Vec3::new(-0.4, -0.6, -1.0).normalize(),
                intensity: initial_light,
            },
            starfield: Starfield::new(star_count, 0x5EED_57A2),
            renderer: Some(renderer),
            state: LoopState::Idle,
            scratch: Vec::with_capacity(star_count),
            frames: 0,
        }
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    pub fn set_light_intensity(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.light.intensity = intensity;
        }
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn animate(&mut self) {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
        }
    }

    pub fn resize(&mut self, metrics: SurfaceMetrics) {
        self.camera.aspect = metrics.aspect();
        if let Some(r) = self.renderer.as_mut() {
            let (w, h) = metrics.backing_size();
            r.resize(w, h);
        }
    }

    /// One loop iteration. Returns whether another frame should be scheduled.
    pub fn step(&mut self, now: Instant) -> Result<bool, VizError> {
        if self.state != LoopState::Running {
            return Ok(false);
        }
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(false);
        };
        let elapsed = self.clock.elapsed(now);
        self.starfield.advance(elapsed);
        self.scratch.clear();
        self.scratch.extend(self.starfield.instances());
        let frame = SceneFrame {
            view: self.camera.view_matrix(),
            view_proj: self.camera.view_proj(),
            camera_eye: self.camera.eye,
            light: &self.light,
            stars: &self.scratch,
            time: elapsed.as_secs_f32(),
        };
        renderer.render(&frame)?;
        self.frames += 1;
        Ok(true)
    }

    /// Stop the loop and release the renderer. Safe to call repeatedly and
    /// before the first iteration.
    pub fn cleanup(&mut self, now: Instant) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;
        self.clock.stop(now);
        if let Some(mut r) = self.renderer.take() {
            r.release();
            log::debug!("[scene] released renderer after {} frames", self.frames);
        }
    }
}

impl<R: SceneRenderer> ReactiveParam for SceneManager<R> {
    fn value(&self) -> f32 {
        self.light.intensity
    }

    fn set(&mut self, value: f32) {
        self.set_light_intensity(value);
    }
}

impl<R: SceneRenderer> Drop for SceneManager<R> {
    fn drop(&mut self) {
        if let Some(mut r) = self.renderer.take() {
            r.release();
        }
    }
}
