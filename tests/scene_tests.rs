// Host-side tests for the 3D scene state, home layer and frame timers.

use instant::Instant;
use std::time::Duration;

use viz_web::constants::{CAMERA_Z, STARFIELD_RADIUS};
use viz_web::core::home::{Home, WallClock};
use viz_web::core::layout::SceneLayout;
use viz_web::core::scene::{LoopState, SceneClock, SceneFrame, SceneManager, SceneRenderer, Starfield};
use viz_web::core::timer::{IntervalTimer, MIN_TIMER_PERIOD};
use viz_web::core::{ReactiveParam, SurfaceMetrics, VizError};

#[derive(Default)]
struct CountingRenderer {
    renders: u32,
    releases: u32,
}

impl SceneRenderer for CountingRenderer {
    fn resize(&mut self, _w: u32, _h: u32) {}

    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), VizError> {
        assert!(frame.time >= 0.0);
        self.renders += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}

fn manager() -> SceneManager<CountingRenderer> {
    SceneManager::new(
        CountingRenderer::default(),
        SurfaceMetrics::new(800.0, 600.0, 1.0),
        100,
        1.0,
    )
}

#[test]
fn manager_renders_only_while_running() {
    let t0 = Instant::now();
    let mut m = manager();
    assert_eq!(m.state(), LoopState::Idle);
    assert!(!m.step(t0).unwrap());

    m.clock.start(t0);
    m.animate();
    assert!(m.step(t0 + Duration::from_millis(16)).unwrap());
    assert!(m.step(t0 + Duration::from_millis(32)).unwrap());
    assert_eq!(m.frames_rendered(), 2);
    assert_eq!(m.renderer().unwrap().renders, 2);

    m.cleanup(t0 + Duration::from_millis(40));
    assert_eq!(m.state(), LoopState::Stopped);
    assert!(m.renderer().is_none());
    assert!(!m.step(t0 + Duration::from_millis(48)).unwrap());
    // cleanup is safe to repeat and animate cannot restart a stopped loop
    m.cleanup(t0 + Duration::from_millis(50));
    m.animate();
    assert_eq!(m.state(), LoopState::Stopped);
}

#[test]
fn cleanup_before_first_frame_is_safe() {
    let t0 = Instant::now();
    let mut m = manager();
    m.cleanup(t0);
    m.cleanup(t0);
    assert_eq!(m.frames_rendered(), 0);
}

#[test]
fn light_is_the_reactive_parameter() {
    let mut m = manager();
    assert_eq!(m.value(), 1.0);
    m.set(4.0);
    assert_eq!(m.light().intensity, 4.0);
    m.set(f32::NAN);
    assert_eq!(m.light().intensity, 4.0);
}

#[test]
fn resize_updates_camera_aspect() {
    let mut m = manager();
    m.resize(SurfaceMetrics::new(1000.0, 500.0, 2.0));
    assert_eq!(m.camera.aspect, 2.0);
    assert_eq!(m.camera.eye.z, CAMERA_Z);
}

#[test]
fn clock_freezes_when_stopped() {
    let t0 = Instant::now();
    let mut clock = SceneClock::default();
    assert_eq!(clock.elapsed(t0), Duration::ZERO);
    clock.start(t0);
    assert!(clock.running());
    assert_eq!(clock.elapsed(t0 + Duration::from_secs(2)), Duration::from_secs(2));
    clock.stop(t0 + Duration::from_secs(3));
    assert!(!clock.running());
    assert_eq!(clock.elapsed(t0 + Duration::from_secs(10)), Duration::from_secs(3));
}

#[test]
fn starfield_is_deterministic_and_stays_in_its_shell() {
    let a = Starfield::new(500, 42);
    let b = Starfield::new(500, 42);
    assert_eq!(a.len(), 500);
    assert!(a.instances().zip(b.instances()).all(|(x, y)| x == y));

    let mut field = Starfield::new(500, 42);
    for secs in [0, 1, 17, 120, 3600] {
        field.advance(Duration::from_secs(secs));
        for star in field.instances() {
            assert!(star.position.z <= STARFIELD_RADIUS + 1e-3);
            assert!(star.position.z >= -STARFIELD_RADIUS * 3.0);
            assert!(star.size > 0.0);
        }
    }
    assert!(Starfield::new(0, 1).is_empty());
}

#[test]
fn layout_is_proportional() {
    let l = SceneLayout::new(1200.0, 800.0);
    assert_eq!(l.one_third_width, 400.0);
    assert_eq!(l.one_half_height, 400.0);
    assert_eq!(l.window_frame_thickness, 20.0);
    assert_eq!(l.sill_y(), 600.0);
}

#[test]
fn home_window_sits_inside_the_wall() {
    let home = Home::new(1200.0, 800.0, 0.0);
    let w = home.window();
    assert!(w.left > 0.0 && w.right < 1200.0);
    assert!(w.top > 0.0 && w.bottom < 800.0);
    assert_eq!(w.bottom, home.layout().sill_y());
}

#[test]
fn wall_clock_wraps_and_tolerates_bad_input() {
    let mut c = WallClock::new(13.0 * 3600.0 + 5.0 * 60.0 + 9.5);
    assert_eq!(c.hms(), (13, 5, 9));
    c.tick(86_400.0 + 61.0);
    assert_eq!(c.hms(), (0, 1, 1));
    c.tick(f64::NAN);
    assert_eq!(c.hms(), (0, 0, 0));
    let (h, m, s) = WallClock::new(3.0 * 3600.0).hand_angles();
    assert!((h - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    assert_eq!((m, s), (0.0, 0.0));
}

#[test]
fn interval_timer_collapses_missed_periods() {
    let t0 = Instant::now();
    let period = Duration::from_secs(1);
    let mut timer = IntervalTimer::start(period, t0);
    assert!(!timer.poll(t0 + Duration::from_millis(999)));
    assert!(timer.poll(t0 + Duration::from_millis(1000)));
    assert!(!timer.poll(t0 + Duration::from_millis(1500)));
    // a long stall fires once, then resumes the normal cadence
    assert!(timer.poll(t0 + Duration::from_millis(5300)));
    assert!(!timer.poll(t0 + Duration::from_millis(5900)));
    assert!(timer.poll(t0 + Duration::from_millis(6000)));

    timer.cancel();
    assert!(!timer.is_active());
    assert!(!timer.poll(t0 + Duration::from_secs(60)));
}

#[test]
fn zero_period_timer_is_clamped_and_polls_return() {
    let t0 = Instant::now();
    let mut timer = IntervalTimer::start(Duration::ZERO, t0);
    assert_eq!(timer.period(), MIN_TIMER_PERIOD);
    assert!(timer.poll(t0 + Duration::from_millis(5)));
    assert!(!timer.poll(t0 + Duration::from_millis(5)));
    assert!(timer.poll(t0 + Duration::from_millis(6)));
    // a stall of a million periods still fires exactly once
    assert!(timer.poll(t0 + Duration::from_secs(1000)));
    assert!(!timer.poll(t0 + Duration::from_secs(1000)));
}
