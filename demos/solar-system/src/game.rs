//! Solar System: textured planets on circular orbits around a glowing sun.
//!
//! Hovering a planet lights it up; clicking it pulses the planet and flies
//! the camera next to it. Drag orbits the view, the wheel zooms. Keys 1-9
//! (or a UI select event) fly to a planet; Escape flies back to the start.

use glam::{Vec2, Vec3};
use orrery_engine::*;

use crate::builder::{build_scene, SolarScene};
use crate::catalog::CATALOG;
use crate::orbit::{self, OrbitalClock};
use crate::picker::{pick_hovered_planet, HoverState};

// ── Camera ───────────────────────────────────────────────────────────

const CAMERA_START: Vec3 = Vec3::new(0.0, 40.0, 120.0);
/// Where the fly-to parks the camera, relative to the clicked planet.
const FLY_TO_OFFSET: Vec3 = Vec3::new(10.0, 5.0, 10.0);
const FLY_TO_DURATION: f32 = 1.5;

// ── Click pulse ──────────────────────────────────────────────────────

const PULSE_SCALE: f32 = 1.3;
/// Seconds per leg; the pulse grows then shrinks back.
const PULSE_LEG: f32 = 0.2;

// ── Keyboard (DOM keyCode) ───────────────────────────────────────────

const KEY_ESCAPE: u32 = 27;
const KEY_1: u32 = 49;
const KEY_9: u32 = 57;

// ── Custom event kinds from the UI ───────────────────────────────────

/// Fly to a planet. `a` = planet index.
pub const CUSTOM_SELECT: u32 = 1;
/// Fly back to the starting view.
pub const CUSTOM_RESET_VIEW: u32 = 2;

// ── Game event kinds to the host ─────────────────────────────────────

/// Hover changed. `a` = planet index, or -1 when nothing is hovered.
pub const EVENT_HOVER: f32 = 1.0;
/// Fly-to started. `a` = planet index, or -1 for the starting view.
pub const EVENT_FLY_TO: f32 = 2.0;
/// Fly-to arrived (reported by the runner when the camera tween ends).
pub const EVENT_FLY_TO_DONE: u32 = 3;

/// State shared between input handlers and the per-frame steps.
#[derive(Debug, Clone, Default)]
pub struct FrameContext {
    pub clock: OrbitalClock,
    /// Last pointer position in normalized device coordinates. Starts at
    /// the screen center until the pointer first moves.
    pub cursor: Vec2,
    pub hover: HoverState,
}

pub struct SolarSystem {
    frame: FrameContext,
    solar: Option<SolarScene>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            frame: FrameContext::default(),
            solar: None,
        }
    }

    pub fn frame(&self) -> &FrameContext {
        &self.frame
    }

    pub fn solar(&self) -> Option<&SolarScene> {
        self.solar.as_ref()
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            fov_y: 75.0,
            near: 0.1,
            far: 2000.0,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let mut rng = Rng::new(self.config().seed);
        self.solar = Some(build_scene(ctx, &mut rng));

        ctx.camera.position = CAMERA_START;
        ctx.camera.look_at(Vec3::ZERO);
        ctx.controls = OrbitControls::new(Vec3::ZERO);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(solar) = &self.solar else { return };
        let frame = &mut self.frame;

        for event in input.iter() {
            match *event {
                InputEvent::PointerMove { x, y } => {
                    let px = Vec2::new(x, y);
                    frame.cursor = ctx.pixel_to_ndc(px);
                    let height = ctx.viewport.height();
                    ctx.controls.pointer_move(px, height);
                }
                InputEvent::PointerDown { x, y } => ctx.controls.pointer_down(Vec2::new(x, y)),
                InputEvent::PointerUp { .. } => ctx.controls.pointer_up(),
                InputEvent::Wheel { delta } => ctx.controls.wheel(delta),
                InputEvent::Resize { width, height } => on_resize(ctx, width, height),
                InputEvent::Click { .. } => {
                    if let Some(index) = frame.hover.current() {
                        fly_to_planet(ctx, solar, index);
                    }
                }
                InputEvent::KeyDown { key_code: KEY_ESCAPE } => reset_view(ctx, solar),
                InputEvent::KeyDown { key_code } if (KEY_1..=KEY_9).contains(&key_code) => {
                    fly_to_planet(ctx, solar, (key_code - KEY_1) as usize);
                }
                InputEvent::Custom { kind: CUSTOM_SELECT, a, .. } => {
                    if a >= 0.0 && a.fract() == 0.0 {
                        fly_to_planet(ctx, solar, a as usize);
                    } else {
                        log::warn!("select: bad planet index {}", a);
                    }
                }
                InputEvent::Custom { kind: CUSTOM_RESET_VIEW, .. } => reset_view(ctx, solar),
                _ => {}
            }
        }

        advance_frame(ctx, solar, frame);
    }
}

/// Per-frame animation: orbits, spins, hover, controls.
fn advance_frame(ctx: &mut EngineContext, solar: &SolarScene, frame: &mut FrameContext) {
    let angle = frame.clock.advance();

    for (i, &id) in solar.planets.iter().enumerate() {
        if let Some(planet) = ctx.scene.get_mut(id) {
            planet.rotation.y += orbit::spin_rate(i);
            planet.pos = orbit::planet_position(i, CATALOG[i].distance, angle);
        }
        if let Some(moon) = solar.moons[i].and_then(|m| ctx.scene.get_mut(m)) {
            moon.pos = orbit::moon_offset(angle);
        }
    }

    let picked = pick_hovered_planet(frame.cursor, &ctx.camera, &ctx.scene, &ctx.graph, &solar.planets);
    if frame.hover.apply(picked, &mut ctx.scene, &solar.planets) {
        let a = picked.map_or(-1.0, |i| i as f32);
        ctx.emit_event(GameEvent::new(EVENT_HOVER, a));
    }

    for id in [solar.sun, solar.glow] {
        if let Some(e) = ctx.scene.get_mut(id) {
            e.rotation.y += orbit::SUN_SPIN;
        }
    }

    ctx.controls.update(&mut ctx.camera);
}

/// Pulse a planet and fly the camera next to it, replacing any flight in
/// progress.
fn fly_to_planet(ctx: &mut EngineContext, solar: &SolarScene, index: usize) {
    let Some(&id) = solar.planets.get(index) else {
        log::warn!("fly-to: no planet {}", index);
        return;
    };
    let Some(planet_pos) = ctx.world_position(id) else { return };

    ctx.tweens.replace(
        TweenSubject::Entity(id),
        Tween::scale(1.0, PULSE_SCALE, PULSE_LEG, Easing::QuadOut).with_loop(TweenLoop::Yoyo),
    );

    let from = ctx.camera.position;
    let to = planet_pos + FLY_TO_OFFSET;
    ctx.tweens.replace(
        TweenSubject::Camera,
        Tween::camera_position(from, to, Some(id), FLY_TO_DURATION, Easing::QuadOut)
            .with_on_complete(EVENT_FLY_TO_DONE),
    );

    log::debug!("fly-to: {} at {:?}", CATALOG[index].name, to);
    ctx.emit_event(GameEvent::new(EVENT_FLY_TO, index as f32));
}

/// Fly back to the starting view, facing the sun.
fn reset_view(ctx: &mut EngineContext, solar: &SolarScene) {
    let from = ctx.camera.position;
    ctx.tweens.replace(
        TweenSubject::Camera,
        Tween::camera_position(from, CAMERA_START, Some(solar.sun), FLY_TO_DURATION, Easing::QuadOut)
            .with_on_complete(EVENT_FLY_TO_DONE),
    );
    log::debug!("fly-to: starting view");
    ctx.emit_event(GameEvent::new(EVENT_FLY_TO, -1.0));
}

fn on_resize(ctx: &mut EngineContext, width: f32, height: f32) {
    if ctx.resize(width, height) {
        log::info!("resize: {}x{} (aspect {:.3})", width, height, ctx.camera.aspect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_web::GameRunner;
    use std::f64::consts::PI;

    const DT: f32 = 1.0 / 60.0;

    fn runner() -> GameRunner<SolarSystem> {
        let mut r = GameRunner::new(SolarSystem::new());
        r.init();
        r
    }

    fn solar(r: &GameRunner<SolarSystem>) -> &SolarScene {
        r.game().solar().unwrap()
    }

    /// Pixel position of a world point on the default 1280x720 surface.
    fn to_pixel(r: &GameRunner<SolarSystem>, world: Vec3) -> Vec2 {
        let ndc = r.ctx().camera.project(world).unwrap();
        let vp = &r.ctx().viewport;
        Vec2::new((ndc.x + 1.0) * 0.5 * vp.width(), (1.0 - ndc.y) * 0.5 * vp.height())
    }

    /// Point the cursor at a planet's position one frame from now.
    fn hover_planet(r: &mut GameRunner<SolarSystem>, index: usize) {
        let next = r.game().frame().clock.angle + orbit::ANGLE_STEP;
        let target = orbit::planet_position(index, CATALOG[index].distance, next);
        let px = to_pixel(r, target);
        r.push_input(InputEvent::PointerMove { x: px.x, y: px.y });
        r.step(DT);
    }

    fn highlighted(r: &GameRunner<SolarSystem>) -> Vec<usize> {
        solar(r)
            .planets
            .iter()
            .enumerate()
            .filter(|(_, id)| {
                let m = r.ctx().scene.get(**id).unwrap().material.unwrap();
                !m.emissive.is_black()
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn events_of(r: &GameRunner<SolarSystem>, kind: f32) -> Vec<GameEvent> {
        r.ctx().events.iter().copied().filter(|e| e.kind == kind).collect()
    }

    #[test]
    fn first_frame_has_everything() {
        let r = runner();
        // sun, glow, 9 planets, 9 orbit guides, ring, moon
        assert_eq!(r.instance_count(), 22);
        assert_eq!(r.point_count(), 2000);
        assert_eq!(r.light_count(), 1);
        assert_eq!(r.ctx().camera.position, CAMERA_START);
        assert!(r.texture_manifest_json().contains("textures/saturn.jpg"));
    }

    #[test]
    fn earth_reaches_the_far_side_at_third_of_pi() {
        let mut game = SolarSystem::new();
        let mut ctx = EngineContext::new(&game.config());
        game.init(&mut ctx);
        game.frame.clock.angle = PI / 3.0 - orbit::ANGLE_STEP;
        game.update(&mut ctx, &InputQueue::new());

        let earth = ctx.scene.get(game.solar().unwrap().planets[2]).unwrap();
        assert!((earth.pos - Vec3::new(-16.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn planets_and_moon_follow_the_clock() {
        let mut r = runner();
        for _ in 0..10 {
            r.step(DT);
        }
        let angle = r.game().frame().clock.angle;
        assert!((angle - 0.01).abs() < 1e-9);

        for (i, id) in solar(&r).planets.iter().enumerate() {
            let p = r.ctx().scene.get(*id).unwrap();
            let expected = orbit::planet_position(i, CATALOG[i].distance, angle);
            assert!((p.pos - expected).length() < 1e-5);
            assert!((p.rotation.y - 10.0 * orbit::spin_rate(i)).abs() < 1e-5);
        }

        let moon = solar(&r).moons[2].unwrap();
        let moon = r.ctx().scene.get(moon).unwrap();
        assert!((moon.pos - orbit::moon_offset(angle)).length() < 1e-6);
    }

    #[test]
    fn hover_highlights_one_planet_and_reports_it() {
        let mut r = runner();
        hover_planet(&mut r, 4);
        assert_eq!(r.game().frame().hover.current(), Some(4));
        assert_eq!(highlighted(&r), vec![4]);
        let events = events_of(&r, EVENT_HOVER);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].a, 4.0);

        // Staying put reports nothing new.
        r.step(DT);
        assert!(events_of(&r, EVENT_HOVER).is_empty());

        hover_planet(&mut r, 0);
        assert_eq!(highlighted(&r), vec![0]);
    }

    #[test]
    fn moving_off_every_planet_clears_the_highlight() {
        let mut r = runner();
        hover_planet(&mut r, 4);
        r.push_input(InputEvent::PointerMove { x: 5.0, y: 5.0 });
        r.step(DT);
        assert_eq!(r.game().frame().hover.current(), None);
        assert!(highlighted(&r).is_empty());
        assert_eq!(events_of(&r, EVENT_HOVER)[0].a, -1.0);
    }

    #[test]
    fn click_without_hover_does_nothing() {
        let mut r = runner();
        r.push_input(InputEvent::PointerMove { x: 5.0, y: 5.0 });
        r.step(DT);
        let before = r.ctx().camera.position;
        r.push_input(InputEvent::Click { x: 5.0, y: 5.0 });
        r.step(DT);

        // Only the starfield twinkle.
        assert_eq!(r.ctx().tweens.len(), 1);
        assert!(events_of(&r, EVENT_FLY_TO).is_empty());
        assert!((r.ctx().camera.position - before).length() < 1e-3);
    }

    #[test]
    fn click_pulses_and_flies_to_the_planet() {
        let mut r = runner();
        hover_planet(&mut r, 4);
        let jupiter = solar(&r).planets[4];
        let planet_pos = r.ctx().scene.get(jupiter).unwrap().pos;

        r.push_input(InputEvent::Click { x: 0.0, y: 0.0 });
        r.step(DT);
        assert_eq!(events_of(&r, EVENT_FLY_TO)[0].a, 4.0);
        assert!(r.ctx().scene.get(jupiter).unwrap().scale.x > 1.0);

        let mut arrived = false;
        for _ in 0..120 {
            r.step(DT);
            arrived |= !events_of(&r, EVENT_FLY_TO_DONE as f32).is_empty();
        }
        assert!(arrived);
        assert!((r.ctx().camera.position - (planet_pos + FLY_TO_OFFSET)).length() < 0.5);
        assert!((r.ctx().scene.get(jupiter).unwrap().scale - Vec3::ONE).length() < 1e-5);
    }

    fn camera_flight(r: &GameRunner<SolarSystem>) -> (Vec3, Option<EntityId>) {
        let flight = r
            .ctx()
            .tweens
            .find(TweenSubject::Camera, TweenChannel::CameraPosition)
            .unwrap();
        match flight.target {
            TweenTarget::CameraPosition { to, look_at, .. } => (to, look_at),
            other => panic!("camera tween drives {:?}", other),
        }
    }

    #[test]
    fn click_on_another_planet_mid_flight_retargets_the_camera() {
        let mut r = runner();
        hover_planet(&mut r, 4);
        r.push_input(InputEvent::Click { x: 0.0, y: 0.0 });
        r.step(DT);

        hover_planet(&mut r, 0);
        assert_eq!(r.game().frame().hover.current(), Some(0));
        let mercury = solar(&r).planets[0];
        let mercury_pos = r.ctx().scene.get(mercury).unwrap().pos;
        r.push_input(InputEvent::Click { x: 0.0, y: 0.0 });
        r.step(DT);

        // Starfield, two pulses, one flight.
        assert_eq!(r.ctx().tweens.len(), 4);
        let (to, look_at) = camera_flight(&r);
        assert!((to - (mercury_pos + FLY_TO_OFFSET)).length() < 1e-5);
        assert_eq!(look_at, Some(mercury));
        assert_eq!(events_of(&r, EVENT_FLY_TO)[0].a, 0.0);
    }

    #[test]
    fn number_keys_fly_to_planets() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key_code: 49 + 5 });
        r.step(DT);
        let saturn = solar(&r).planets[5];
        assert_eq!(events_of(&r, EVENT_FLY_TO)[0].a, 5.0);
        assert_eq!(camera_flight(&r).1, Some(saturn));
        assert!(r.ctx().scene.get(saturn).unwrap().scale.x > 1.0);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key_code: 65 });
        r.push_input(InputEvent::KeyDown { key_code: 48 });
        r.step(DT);
        assert_eq!(r.ctx().tweens.len(), 1);
        assert!(events_of(&r, EVENT_FLY_TO).is_empty());
    }

    #[test]
    fn escape_flies_back_to_the_starting_view() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key_code: 49 + 4 });
        for _ in 0..120 {
            r.step(DT);
        }
        assert!((r.ctx().camera.position - CAMERA_START).length() > 10.0);

        r.push_input(InputEvent::KeyDown { key_code: 27 });
        r.step(DT);
        assert_eq!(events_of(&r, EVENT_FLY_TO)[0].a, -1.0);
        assert_eq!(camera_flight(&r), (CAMERA_START, Some(solar(&r).sun)));
        for _ in 0..120 {
            r.step(DT);
        }
        assert!((r.ctx().camera.position - CAMERA_START).length() < 0.5);
    }

    #[test]
    fn ui_select_and_reset_events() {
        let mut r = runner();
        r.push_input(InputEvent::Custom { kind: CUSTOM_SELECT, a: 2.0, b: 0.0, c: 0.0 });
        r.step(DT);
        assert_eq!(camera_flight(&r).1, Some(solar(&r).planets[2]));

        r.push_input(InputEvent::Custom { kind: CUSTOM_RESET_VIEW, a: 0.0, b: 0.0, c: 0.0 });
        r.step(DT);
        assert_eq!(camera_flight(&r).0, CAMERA_START);
    }

    #[test]
    fn ui_select_rejects_bad_indices() {
        let mut r = runner();
        for a in [9.0, -1.0, 2.5] {
            r.push_input(InputEvent::Custom { kind: CUSTOM_SELECT, a, b: 0.0, c: 0.0 });
        }
        r.step(DT);
        assert_eq!(r.ctx().tweens.len(), 1);
        assert!(events_of(&r, EVENT_FLY_TO).is_empty());
    }

    #[test]
    fn resize_refits_camera_and_surface() {
        let mut r = runner();
        r.push_input(InputEvent::Resize { width: 1920.0, height: 1080.0 });
        r.step(DT);
        assert!((r.ctx().camera.aspect - 1.778).abs() < 1e-3);

        r.push_input(InputEvent::Resize { width: 800.0, height: 600.0 });
        r.step(DT);
        assert!((r.ctx().camera.aspect - 1.333).abs() < 1e-3);
        assert_eq!((r.surface_width(), r.surface_height()), (800.0, 600.0));

        r.push_input(InputEvent::Resize { width: 0.0, height: 600.0 });
        r.step(DT);
        assert_eq!(r.surface_width(), 800.0);
    }

    #[test]
    fn starfield_twinkle_returns_after_two_seconds() {
        let mut r = runner();
        let stars = solar(&r).starfield;
        let opacity = |r: &GameRunner<SolarSystem>| r.ctx().scene.get(stars).unwrap().material.unwrap().opacity;

        for _ in 0..20 {
            r.step(0.05);
        }
        assert!((opacity(&r) - 0.3).abs() < 1e-3);
        for _ in 0..20 {
            r.step(0.05);
        }
        assert!((opacity(&r) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn drag_orbits_the_camera_around_the_sun() {
        let mut r = runner();
        let start = r.ctx().camera.position;
        r.push_input(InputEvent::PointerDown { x: 600.0, y: 360.0 });
        r.push_input(InputEvent::PointerMove { x: 700.0, y: 360.0 });
        r.push_input(InputEvent::PointerUp { x: 700.0, y: 360.0 });
        for _ in 0..30 {
            r.step(DT);
        }
        let now = r.ctx().camera.position;
        assert!((now - start).length() > 1.0);
        assert!((now.length() - start.length()).abs() < 1e-2);
    }
}
