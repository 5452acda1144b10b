use crate::assets::registry::TextureId;

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Pack back to `0xRRGGBB` (rounded).
    pub fn to_hex(self) -> u32 {
        let c = |v: f32| ((v.clamp(0.0, 1.0) * 255.0).round() as u32) & 0xff;
        (c(self.r) << 16) | (c(self.g) << 8) | c(self.b)
    }

    pub fn is_black(self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Shading model the host renderer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialKind {
    /// Unlit, flat color.
    Basic,
    /// Physically-based lit surface.
    #[default]
    Standard,
    /// Blinn-Phong lit surface.
    Phong,
    /// Screen-facing point sprites.
    Points,
}

impl MaterialKind {
    /// Wire value written into instance flags.
    pub fn code(self) -> u32 {
        match self {
            MaterialKind::Basic => 0,
            MaterialKind::Standard => 1,
            MaterialKind::Phong => 2,
            MaterialKind::Points => 3,
        }
    }
}

/// Surface description for a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Color,
    /// Self-illumination color. Black means "not emissive".
    pub emissive: Color,
    pub emissive_intensity: f32,
    /// 0.0 = invisible, 1.0 = opaque. Only honored when `transparent` is set.
    pub opacity: f32,
    pub transparent: bool,
    /// Render both faces (flat rings are visible from below).
    pub double_sided: bool,
    /// Surface texture, if one was requested. Whether it actually loaded
    /// is tracked by the texture registry.
    pub texture: Option<TextureId>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Standard,
            color: Color::WHITE,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            opacity: 1.0,
            transparent: false,
            double_sided: false,
            texture: None,
        }
    }
}

impl Material {
    pub fn basic(color: Color) -> Self {
        Self { kind: MaterialKind::Basic, color, ..Default::default() }
    }

    pub fn standard(color: Color) -> Self {
        Self { kind: MaterialKind::Standard, color, ..Default::default() }
    }

    pub fn phong(color: Color) -> Self {
        Self { kind: MaterialKind::Phong, color, ..Default::default() }
    }

    pub fn points(color: Color) -> Self {
        Self { kind: MaterialKind::Points, color, ..Default::default() }
    }

    // -- Builder methods --

    pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    /// Mark transparent and set the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity;
        self
    }

    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Opacity the renderer should actually apply.
    pub fn effective_opacity(&self) -> f32 {
        if self.transparent {
            self.opacity
        } else {
            1.0
        }
    }
}
