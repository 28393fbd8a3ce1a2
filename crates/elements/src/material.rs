//! Display materials.

use serde::{Deserialize, Serialize};

/// An RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Color {
    /// Red.
    pub red: f64,
    /// Green.
    pub green: f64,
    /// Blue.
    pub blue: f64,
    /// Alpha.
    pub alpha: f64,
}

impl Color {
    /// Create a color; components are clamped into `[0, 1]`.
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red: red.clamp(0.0, 1.0),
            green: green.clamp(0.0, 1.0),
            blue: blue.clamp(0.0, 1.0),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

/// A named material. Elements carry it without interpreting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Material {
    /// Material name.
    pub name: String,
    /// Base color.
    pub color: Color,
    /// Specular factor in `[0, 1]`.
    pub specular_factor: f64,
    /// Glossiness factor in `[0, 1]`.
    pub glossiness_factor: f64,
}

impl Material {
    /// Create a material with default specular and glossiness factors.
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            specular_factor: 0.1,
            glossiness_factor: 0.1,
        }
    }

    /// The default wall material.
    pub fn concrete() -> Self {
        Self::new("Concrete", Color::new(0.5, 0.5, 0.5, 1.0))
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::concrete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_clamps() {
        let c = Color::new(1.5, -0.2, 0.3, 1.0);
        assert_eq!(c.red, 1.0);
        assert_eq!(c.green, 0.0);
        assert_eq!(c.blue, 0.3);
    }

    #[test]
    fn test_default_is_concrete() {
        assert_eq!(Material::default().name, "Concrete");
        let json = serde_json::to_value(Material::default()).unwrap();
        assert_eq!(json["Color"]["Alpha"], 1.0);
    }
}
