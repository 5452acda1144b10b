//! Scene construction: starfield, sun, lights, planets and their extras.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use orrery_engine::*;

use crate::catalog::{Augmentation, CATALOG};

// ── Starfield ────────────────────────────────────────────────────────

const STAR_COUNT: usize = 2000;
const STARFIELD_SIDE: f32 = 1000.0;
const STAR_SIZE: f32 = 0.5;
/// Twinkle: opacity swings between these, one second per leg.
const TWINKLE_FROM: f32 = 1.0;
const TWINKLE_TO: f32 = 0.3;
const TWINKLE_LEG: f32 = 1.0;

// ── Sun ──────────────────────────────────────────────────────────────

const SUN_RADIUS: f32 = 4.0;
const SUN_COLOR: Color = Color::from_hex(0xffff00);
const SUN_EMISSIVE: Color = Color::from_hex(0xffdd00);
const GLOW_RADIUS: f32 = 5.0;
const GLOW_OPACITY: f32 = 0.2;
const SUN_LIGHT_INTENSITY: f32 = 2.0;
const SUN_LIGHT_RANGE: f32 = 300.0;
const AMBIENT_INTENSITY: f32 = 0.2;

// ── Planets ──────────────────────────────────────────────────────────

const PLANET_SEGMENTS: u32 = 64;
const ORBIT_HALF_WIDTH: f32 = 0.05;
const ORBIT_SEGMENTS: u32 = 128;
const ORBIT_COLOR: Color = Color::from_hex(0x444444);
const ORBIT_OPACITY: f32 = 0.4;

const RING_INNER_GAP: f32 = 0.5;
const RING_OUTER_GAP: f32 = 1.2;
const RING_COLOR: Color = Color::from_hex(0xffffaa);
const RING_OPACITY: f32 = 0.7;

const MOON_RADIUS: f32 = 0.8;
const MOON_COLOR: Color = Color::from_hex(0xaaaaaa);
/// Initial moon distance beyond the planet surface.
const MOON_GAP: f32 = 3.0;

/// Handles to everything `build_scene` spawned.
///
/// The per-planet vectors are parallel to `CATALOG`.
#[derive(Debug, Clone)]
pub struct SolarScene {
    pub planets: Vec<EntityId>,
    pub orbits: Vec<EntityId>,
    pub moons: Vec<Option<EntityId>>,
    pub rings: Vec<Option<EntityId>>,
    pub sun: EntityId,
    pub glow: EntityId,
    pub starfield: EntityId,
}

/// Spawn the whole scene into `ctx`. Planet textures are requested from the
/// registry; the host loads them asynchronously.
pub fn build_scene(ctx: &mut EngineContext, rng: &mut Rng) -> SolarScene {
    let starfield = spawn_starfield(ctx, rng);
    let (sun, glow) = spawn_sun(ctx);

    ctx.lights.add(PointLight::new(Vec3::ZERO, Color::WHITE, SUN_LIGHT_INTENSITY, SUN_LIGHT_RANGE));
    ctx.lights.set_ambient(Color::WHITE, AMBIENT_INTENSITY);

    let mut planets = Vec::with_capacity(CATALOG.len());
    let mut orbits = Vec::with_capacity(CATALOG.len());
    let mut moons = Vec::with_capacity(CATALOG.len());
    let mut rings = Vec::with_capacity(CATALOG.len());

    for desc in &CATALOG {
        let texture = ctx.textures.request(desc.texture);
        let id = ctx.next_id();
        let planet = Entity::new(id)
            .with_tag(desc.name)
            .with_pos(Vec3::new(desc.distance, 0.0, 0.0))
            .with_mesh(Mesh::sphere(desc.radius, PLANET_SEGMENTS))
            .with_material(Material::standard(Color::WHITE).with_texture(texture));
        let planet_id = ctx.spawn(planet, None);
        planets.push(planet_id);

        let id = ctx.next_id();
        let guide = Entity::new(id)
            .with_tag("orbit")
            .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
            .with_mesh(Mesh::ring(
                desc.distance - ORBIT_HALF_WIDTH,
                desc.distance + ORBIT_HALF_WIDTH,
                ORBIT_SEGMENTS,
            ))
            .with_material(Material::basic(ORBIT_COLOR).with_opacity(ORBIT_OPACITY).double_sided());
        orbits.push(ctx.spawn(guide, None));

        let (moon, ring) = match desc.augmentation {
            Augmentation::None => (None, None),
            Augmentation::Ring => {
                let id = ctx.next_id();
                let ring = Entity::new(id)
                    .with_tag("ring")
                    .with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0))
                    .with_mesh(Mesh::ring(
                        desc.radius + RING_INNER_GAP,
                        desc.radius + RING_OUTER_GAP,
                        PLANET_SEGMENTS,
                    ))
                    .with_material(Material::basic(RING_COLOR).with_opacity(RING_OPACITY).double_sided());
                (None, Some(ctx.spawn(ring, Some(planet_id))))
            }
            Augmentation::Moon => {
                let id = ctx.next_id();
                let moon = Entity::new(id)
                    .with_tag("moon")
                    .with_pos(Vec3::new(desc.radius + MOON_GAP, 0.0, 0.0))
                    .with_mesh(Mesh::sphere(MOON_RADIUS, 32))
                    .with_material(Material::standard(MOON_COLOR));
                (Some(ctx.spawn(moon, Some(planet_id))), None)
            }
        };
        moons.push(moon);
        rings.push(ring);
    }

    log::info!(
        "solar-system: built {} planets, {} stars, {} textures requested",
        planets.len(),
        STAR_COUNT,
        ctx.textures.len()
    );

    SolarScene { planets, orbits, moons, rings, sun, glow, starfield }
}

fn spawn_starfield(ctx: &mut EngineContext, rng: &mut Rng) -> EntityId {
    let positions: Vec<Vec3> = (0..STAR_COUNT).map(|_| rng.in_cube(STARFIELD_SIDE)).collect();
    let id = ctx.next_id();
    let stars = Entity::new(id)
        .with_tag("stars")
        .with_mesh(Mesh::points(positions, STAR_SIZE))
        .with_material(Material::points(Color::WHITE).with_opacity(TWINKLE_FROM));
    let id = ctx.spawn(stars, None);

    ctx.tweens.add(
        TweenSubject::Entity(id),
        Tween::opacity(TWINKLE_FROM, TWINKLE_TO, TWINKLE_LEG, Easing::SineInOut)
            .with_loop(TweenLoop::PingPong),
    );
    id
}

fn spawn_sun(ctx: &mut EngineContext) -> (EntityId, EntityId) {
    let id = ctx.next_id();
    let sun = Entity::new(id)
        .with_tag("sun")
        .with_mesh(Mesh::sphere(SUN_RADIUS, 64))
        .with_material(Material::phong(SUN_COLOR).with_emissive(SUN_EMISSIVE, 1.0));
    let sun = ctx.spawn(sun, None);

    let id = ctx.next_id();
    let glow = Entity::new(id)
        .with_tag("glow")
        .with_mesh(Mesh::sphere(GLOW_RADIUS, 32))
        .with_material(Material::basic(SUN_EMISSIVE).with_opacity(GLOW_OPACITY));
    let glow = ctx.spawn(glow, None);

    (sun, glow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built() -> (EngineContext, SolarScene) {
        let mut ctx = EngineContext::default();
        let mut rng = Rng::new(42);
        let solar = build_scene(&mut ctx, &mut rng);
        (ctx, solar)
    }

    #[test]
    fn every_planet_starts_on_the_x_axis_at_its_distance() {
        let (ctx, solar) = built();
        assert_eq!(solar.planets.len(), CATALOG.len());
        for (i, id) in solar.planets.iter().enumerate() {
            let planet = ctx.scene.get(*id).unwrap();
            assert_eq!(planet.pos, Vec3::new(CATALOG[i].distance, 0.0, 0.0));
            assert_eq!(planet.tag, CATALOG[i].name);
            assert_eq!(planet.mesh, Some(Mesh::sphere(CATALOG[i].radius, 64)));
        }
    }

    #[test]
    fn planets_request_their_textures() {
        let (ctx, solar) = built();
        assert_eq!(ctx.textures.len(), 9);
        let earth = ctx.scene.get(solar.planets[2]).unwrap();
        let tex = earth.material.unwrap().texture.unwrap();
        assert_eq!(ctx.textures.path(tex), Some("textures/earth.jpg"));
        assert_eq!(ctx.textures.state(tex), Some(TextureState::Pending));
    }

    #[test]
    fn orbit_guides_are_thin_flat_rings() {
        let (ctx, solar) = built();
        let guide = ctx.scene.get(solar.orbits[4]).unwrap();
        assert_eq!(guide.mesh, Some(Mesh::ring(26.0 - 0.05, 26.0 + 0.05, 128)));
        assert_eq!(guide.rotation.x, FRAC_PI_2);
        let m = guide.material.unwrap();
        assert!(m.double_sided && m.transparent);
        assert_eq!(m.opacity, 0.4);
        assert_eq!(m.color.to_hex(), 0x444444);
    }

    #[test]
    fn only_saturn_has_a_ring_and_only_earth_a_moon() {
        let (ctx, solar) = built();
        for i in 0..CATALOG.len() {
            assert_eq!(solar.rings[i].is_some(), i == 5);
            assert_eq!(solar.moons[i].is_some(), i == 2);
        }
        let ring = solar.rings[5].unwrap();
        assert_eq!(ctx.graph.parent(ring), Some(solar.planets[5]));
        assert_eq!(
            ctx.scene.get(ring).unwrap().mesh,
            Some(Mesh::ring(4.4 + 0.5, 4.4 + 1.2, 64))
        );

        let moon = solar.moons[2].unwrap();
        assert_eq!(ctx.graph.parent(moon), Some(solar.planets[2]));
        let moon = ctx.scene.get(moon).unwrap();
        assert!((moon.pos - Vec3::new(6.2, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(moon.mesh, Some(Mesh::sphere(0.8, 32)));
    }

    #[test]
    fn starfield_fills_the_cube_and_twinkles() {
        let (ctx, solar) = built();
        let stars = ctx.scene.get(solar.starfield).unwrap();
        let Some(Mesh::Points { positions, size }) = &stars.mesh else {
            panic!("starfield should be a point cloud");
        };
        assert_eq!(positions.len(), 2000);
        assert_eq!(*size, 0.5);
        assert!(positions.iter().all(|p| p.abs().max_element() <= 500.0));

        let tween = ctx
            .tweens
            .find(TweenSubject::Entity(solar.starfield), TweenChannel::Opacity)
            .unwrap();
        assert_eq!(tween.loop_mode, TweenLoop::PingPong);
        assert_eq!(tween.target, TweenTarget::Opacity { from: 1.0, to: 0.3 });
    }

    #[test]
    fn same_seed_same_sky() {
        let (a, sa) = built();
        let (b, sb) = built();
        assert_eq!(a.scene.get(sa.starfield).unwrap().mesh, b.scene.get(sb.starfield).unwrap().mesh);
    }

    #[test]
    fn sun_glow_and_lights() {
        let (ctx, solar) = built();
        let sun = ctx.scene.get(solar.sun).unwrap().material.unwrap();
        assert_eq!(sun.kind, MaterialKind::Phong);
        assert_eq!(sun.emissive.to_hex(), 0xffdd00);

        let glow = ctx.scene.get(solar.glow).unwrap().material.unwrap();
        assert_eq!(glow.kind, MaterialKind::Basic);
        assert_eq!(glow.effective_opacity(), 0.2);

        assert_eq!(ctx.lights.count(), 1);
        let light = ctx.lights.as_slice()[0];
        assert_eq!((light.intensity, light.range), (2.0, 300.0));
        assert_eq!(ctx.lights.ambient_intensity(), 0.2);
    }
}
