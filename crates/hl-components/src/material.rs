//! Absolute roughness of common pipe materials.
//!
//! Values are typical new-pipe figures; aged or encrusted pipe is rougher.

use std::fmt;
use std::str::FromStr;

use crate::error::ComponentError;
use hl_core::units::{Length, m};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Material {
    Pvc,
    Hdpe,
    GalvanizedSteel,
    Concrete,
}

impl Material {
    pub const ALL: [Material; 4] = [
        Material::Pvc,
        Material::Hdpe,
        Material::GalvanizedSteel,
        Material::Concrete,
    ];

    /// Used when a segment names neither a roughness nor a material.
    pub const DEFAULT: Material = Material::Pvc;

    /// Absolute roughness height ε in metres.
    pub fn roughness_m(self) -> f64 {
        match self {
            Material::Pvc => 1.5e-6,
            Material::Hdpe => 7.0e-6,
            Material::GalvanizedSteel => 1.5e-4,
            Material::Concrete => 3.0e-4,
        }
    }

    pub fn roughness(self) -> Length {
        m(self.roughness_m())
    }

    /// Stable identifier, as accepted by `FromStr`.
    pub fn key(self) -> &'static str {
        match self {
            Material::Pvc => "pvc",
            Material::Hdpe => "hdpe",
            Material::GalvanizedSteel => "galvanized_steel",
            Material::Concrete => "concrete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Material::Pvc => "PVC",
            Material::Hdpe => "HDPE",
            Material::GalvanizedSteel => "Galvanized steel",
            Material::Concrete => "Concrete",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Material {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "pvc" => Ok(Material::Pvc),
            "hdpe" | "pe" | "polyethylene" => Ok(Material::Hdpe),
            "galvanized_steel" | "galvanized" | "galvanised_steel" | "gi" => {
                Ok(Material::GalvanizedSteel)
            }
            "concrete" => Ok(Material::Concrete),
            _ => Err(ComponentError::UnknownMaterial {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_values() {
        assert_eq!(Material::Pvc.roughness_m(), 1.5e-6);
        assert_eq!(Material::Hdpe.roughness_m(), 7.0e-6);
        assert_eq!(Material::GalvanizedSteel.roughness_m(), 1.5e-4);
        assert_eq!(Material::Concrete.roughness_m(), 3.0e-4);
    }

    #[test]
    fn parse_keys_and_aliases() {
        for mat in Material::ALL {
            assert_eq!(mat.key().parse::<Material>().unwrap(), mat);
            assert_eq!(mat.label().parse::<Material>().unwrap(), mat);
        }
        assert_eq!("Galvanized".parse::<Material>().unwrap(), Material::GalvanizedSteel);
        assert!(matches!(
            "copper".parse::<Material>(),
            Err(ComponentError::UnknownMaterial { .. })
        ));
    }
}
