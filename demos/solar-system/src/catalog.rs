//! Planet table: names, textures, sizes and orbit distances.
//!
//! Sizes and distances are display units, not astronomy. Distances are
//! spaced so every orbit guide is visible from the default camera.

/// Optional extra geometry attached to a planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Augmentation {
    None,
    /// Flat ring around the planet's equator.
    Ring,
    /// Single moon orbiting the planet.
    Moon,
}

/// Static description of one planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBodyDescriptor {
    pub name: &'static str,
    pub texture: &'static str,
    pub radius: f32,
    /// Orbit radius around the sun.
    pub distance: f32,
    pub augmentation: Augmentation,
}

impl CelestialBodyDescriptor {
    const fn new(
        name: &'static str,
        texture: &'static str,
        radius: f32,
        distance: f32,
        augmentation: Augmentation,
    ) -> Self {
        Self { name, texture, radius, distance, augmentation }
    }
}

pub const PLANET_COUNT: usize = 9;

/// Planets in orbit order. Index `i` also sets the orbital speed (`i + 1`).
pub const CATALOG: [CelestialBodyDescriptor; PLANET_COUNT] = [
    CelestialBodyDescriptor::new("Mercury", "textures/mercury.jpg", 2.0, 8.0, Augmentation::None),
    CelestialBodyDescriptor::new("Venus", "textures/venus.jpg", 3.0, 12.0, Augmentation::None),
    CelestialBodyDescriptor::new("Earth", "textures/earth.jpg", 3.2, 16.0, Augmentation::Moon),
    CelestialBodyDescriptor::new("Mars", "textures/mars.jpg", 2.4, 20.0, Augmentation::None),
    CelestialBodyDescriptor::new("Jupiter", "textures/jupiter.jpg", 5.0, 26.0, Augmentation::None),
    CelestialBodyDescriptor::new("Saturn", "textures/saturn.jpg", 4.4, 32.0, Augmentation::Ring),
    CelestialBodyDescriptor::new("Uranus", "textures/uranus.jpg", 3.6, 38.0, Augmentation::None),
    CelestialBodyDescriptor::new("Neptune", "textures/neptune.jpg", 3.4, 44.0, Augmentation::None),
    CelestialBodyDescriptor::new("Pluto", "textures/pluto.jpg", 1.6, 50.0, Augmentation::None),
];

/// Index of a planet by name.
pub fn index_of(name: &str) -> Option<usize> {
    CATALOG.iter().position(|d| d.name == name)
}
