//! Procedural textures evaluated at world-space points.

use crate::Color;
use prism_math::Vec3;

/// A color field over world space.
#[derive(Clone, Debug, PartialEq)]
pub enum Texture {
    /// The same color everywhere.
    Solid(Color),
    /// 3D checkerboard: `odd` where sin(sx)·sin(sy)·sin(sz) < 0.
    Checker {
        even: Box<Texture>,
        odd: Box<Texture>,
        scale: f32,
    },
    /// Bands perpendicular to `axis`: `second` where sin(scale·(p·axis)) < 0.
    Stripe {
        first: Box<Texture>,
        second: Box<Texture>,
        /// Unit band direction
        axis: Vec3,
        scale: f32,
    },
}

impl Texture {
    pub fn solid(color: Color) -> Self {
        Texture::Solid(color)
    }

    pub fn checker(even: Texture, odd: Texture, scale: f32) -> Self {
        Texture::Checker {
            even: Box::new(even),
            odd: Box::new(odd),
            scale,
        }
    }

    /// Stripes along `axis`. A zero axis falls back to X.
    pub fn stripe(first: Texture, second: Texture, axis: Vec3, scale: f32) -> Self {
        let axis = axis.try_normalize().unwrap_or(Vec3::X);
        Texture::Stripe {
            first: Box::new(first),
            second: Box::new(second),
            axis,
            scale,
        }
    }

    /// Sample the texture at world point `p`.
    pub fn value(&self, p: Vec3) -> Color {
        match self {
            Texture::Solid(color) => *color,
            Texture::Checker { even, odd, scale } => {
                let sines = (p.x * scale).sin() * (p.y * scale).sin() * (p.z * scale).sin();
                if sines < 0.0 {
                    odd.value(p)
                } else {
                    even.value(p)
                }
            }
            Texture::Stripe {
                first,
                second,
                axis,
                scale,
            } => {
                if (scale * p.dot(*axis)).sin() < 0.0 {
                    second.value(p)
                } else {
                    first.value(p)
                }
            }
        }
    }
}

impl From<Color> for Texture {
    fn from(color: Color) -> Self {
        Texture::Solid(color)
    }
}
