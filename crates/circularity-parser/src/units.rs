use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("unit '{0}' is not registered in any measurement family")]
    NotRecognized(String),
    #[error("unit family '{0}' has no conversion table")]
    UnsupportedFamily(String),
}

/// Measurement families, listed in the order `resolve` tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitFamily {
    Area,
    Energy,
    Volume,
    Mass,
    Distance,
}

impl UnitFamily {
    pub const RESOLUTION_ORDER: [UnitFamily; 5] = [
        UnitFamily::Area,
        UnitFamily::Energy,
        UnitFamily::Volume,
        UnitFamily::Mass,
        UnitFamily::Distance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitFamily::Area => "Area",
            UnitFamily::Energy => "Energy",
            UnitFamily::Volume => "Volume",
            UnitFamily::Mass => "Mass",
            UnitFamily::Distance => "Distance",
        }
    }

    pub fn canonical_unit(&self) -> UnitTag {
        match self {
            UnitFamily::Area => UnitTag::Area(AreaUnit::M2),
            UnitFamily::Energy => UnitTag::Energy(EnergyUnit::J),
            UnitFamily::Volume => UnitTag::Volume(VolumeUnit::M3),
            UnitFamily::Mass => UnitTag::Mass(MassUnit::Kg),
            UnitFamily::Distance => UnitTag::Distance(DistanceUnit::M),
        }
    }

    /// Every unit of the family, canonical unit first.
    pub fn units(&self) -> Vec<UnitTag> {
        match self {
            UnitFamily::Area => AreaUnit::ALL.iter().copied().map(UnitTag::Area).collect(),
            UnitFamily::Energy => EnergyUnit::ALL.iter().copied().map(UnitTag::Energy).collect(),
            UnitFamily::Volume => VolumeUnit::ALL.iter().copied().map(UnitTag::Volume).collect(),
            UnitFamily::Mass => MassUnit::ALL.iter().copied().map(UnitTag::Mass).collect(),
            UnitFamily::Distance => DistanceUnit::ALL
                .iter()
                .copied()
                .map(UnitTag::Distance)
                .collect(),
        }
    }

    fn lookup(&self, symbol: &str) -> Option<UnitTag> {
        self.units()
            .into_iter()
            .find(|unit| unit.symbol().eq_ignore_ascii_case(symbol))
    }
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitFamily {
    type Err = UnitError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        UnitFamily::RESOLUTION_ORDER
            .into_iter()
            .find(|family| family.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnitError::UnsupportedFamily(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MassUnit {
    Kg,
    G,
    T,
    Mg,
}

impl MassUnit {
    pub const ALL: [MassUnit; 4] = [MassUnit::Kg, MassUnit::G, MassUnit::T, MassUnit::Mg];

    pub fn symbol(&self) -> &'static str {
        match self {
            MassUnit::Kg => "KG",
            MassUnit::G => "G",
            MassUnit::T => "T",
            MassUnit::Mg => "MG",
        }
    }

    fn to_kilograms(self, value: f64) -> f64 {
        match self {
            MassUnit::Kg => value,
            MassUnit::G => value / 1000.0,
            MassUnit::T => value * 1000.0,
            MassUnit::Mg => value / 1_000_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    M,
    Cm,
    Mm,
    Dm,
    Dam,
    Hm,
    Km,
}

impl DistanceUnit {
    pub const ALL: [DistanceUnit; 7] = [
        DistanceUnit::M,
        DistanceUnit::Cm,
        DistanceUnit::Mm,
        DistanceUnit::Dm,
        DistanceUnit::Dam,
        DistanceUnit::Hm,
        DistanceUnit::Km,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            DistanceUnit::M => "M",
            DistanceUnit::Cm => "CM",
            DistanceUnit::Mm => "MM",
            DistanceUnit::Dm => "DM",
            DistanceUnit::Dam => "DAM",
            DistanceUnit::Hm => "HM",
            DistanceUnit::Km => "KM",
        }
    }

    fn to_meters(self, value: f64) -> f64 {
        match self {
            DistanceUnit::M => value,
            DistanceUnit::Cm => value / 100.0,
            DistanceUnit::Mm => value / 1000.0,
            DistanceUnit::Dm => value / 10.0,
            DistanceUnit::Dam => value * 10.0,
            DistanceUnit::Hm => value * 100.0,
            DistanceUnit::Km => value * 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnergyUnit {
    J,
    Mj,
    Kwh,
}

impl EnergyUnit {
    pub const ALL: [EnergyUnit; 3] = [EnergyUnit::J, EnergyUnit::Mj, EnergyUnit::Kwh];

    pub fn symbol(&self) -> &'static str {
        match self {
            EnergyUnit::J => "J",
            EnergyUnit::Mj => "MJ",
            EnergyUnit::Kwh => "KWH",
        }
    }

    fn to_joules(self, value: f64) -> f64 {
        match self {
            EnergyUnit::J => value,
            EnergyUnit::Mj => value * 1_000_000.0,
            EnergyUnit::Kwh => value * 3_600_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaUnit {
    M2,
    Dm2,
    Dam2,
    Hm2,
    Cm2,
    Km2,
    Mm2,
}

impl AreaUnit {
    pub const ALL: [AreaUnit; 7] = [
        AreaUnit::M2,
        AreaUnit::Dm2,
        AreaUnit::Dam2,
        AreaUnit::Hm2,
        AreaUnit::Cm2,
        AreaUnit::Km2,
        AreaUnit::Mm2,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::M2 => "M2",
            AreaUnit::Dm2 => "DM2",
            AreaUnit::Dam2 => "DAM2",
            AreaUnit::Hm2 => "HM2",
            AreaUnit::Cm2 => "CM2",
            AreaUnit::Km2 => "KM2",
            AreaUnit::Mm2 => "MM2",
        }
    }

    fn to_square_meters(self, value: f64) -> f64 {
        match self {
            AreaUnit::M2 => value,
            AreaUnit::Dm2 => value / 100.0,
            AreaUnit::Hm2 => value * 10_000.0,
            AreaUnit::Dam2 => value * 100.0,
            AreaUnit::Cm2 => value / 10_000.0,
            AreaUnit::Km2 => value * 1_000_000.0,
            AreaUnit::Mm2 => value / 1_000_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeUnit {
    M3,
    L,
    Cm3,
    Dm3,
}

impl VolumeUnit {
    pub const ALL: [VolumeUnit; 4] = [VolumeUnit::M3, VolumeUnit::L, VolumeUnit::Cm3, VolumeUnit::Dm3];

    pub fn symbol(&self) -> &'static str {
        match self {
            VolumeUnit::M3 => "M3",
            VolumeUnit::L => "L",
            VolumeUnit::Cm3 => "CM3",
            VolumeUnit::Dm3 => "DM3",
        }
    }

    fn to_cubic_meters(self, value: f64) -> f64 {
        match self {
            VolumeUnit::M3 => value,
            VolumeUnit::L => value / 1000.0,
            VolumeUnit::Cm3 => value / 1_000_000.0,
            VolumeUnit::Dm3 => value / 1000.0,
        }
    }
}

/// A unit together with the family that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitTag {
    Mass(MassUnit),
    Distance(DistanceUnit),
    Energy(EnergyUnit),
    Area(AreaUnit),
    Volume(VolumeUnit),
}

impl UnitTag {
    pub fn family(&self) -> UnitFamily {
        match self {
            UnitTag::Mass(_) => UnitFamily::Mass,
            UnitTag::Distance(_) => UnitFamily::Distance,
            UnitTag::Energy(_) => UnitFamily::Energy,
            UnitTag::Area(_) => UnitFamily::Area,
            UnitTag::Volume(_) => UnitFamily::Volume,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnitTag::Mass(unit) => unit.symbol(),
            UnitTag::Distance(unit) => unit.symbol(),
            UnitTag::Energy(unit) => unit.symbol(),
            UnitTag::Area(unit) => unit.symbol(),
            UnitTag::Volume(unit) => unit.symbol(),
        }
    }

    pub fn is_canonical(&self) -> bool {
        *self == self.family().canonical_unit()
    }

    /// Converts `value` expressed in this unit into the canonical unit of the family.
    pub fn to_canonical(&self, value: f64) -> (f64, UnitTag) {
        let converted = match self {
            UnitTag::Mass(unit) => unit.to_kilograms(value),
            UnitTag::Distance(unit) => unit.to_meters(value),
            UnitTag::Energy(unit) => unit.to_joules(value),
            UnitTag::Area(unit) => unit.to_square_meters(value),
            UnitTag::Volume(unit) => unit.to_cubic_meters(value),
        };
        (converted, self.family().canonical_unit())
    }

    /// Qualified form used for serialization, e.g. `Mass.KG`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.family(), self.symbol())
    }
}

impl fmt::Display for UnitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for UnitTag {
    type Err = UnitError;

    /// Accepts either a bare symbol (`kg`) or a qualified name (`Mass.KG`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.split_once('.') {
            Some((family, symbol)) => {
                let family: UnitFamily = family.parse()?;
                family
                    .lookup(symbol)
                    .ok_or_else(|| UnitError::NotRecognized(value.to_string()))
            }
            None => resolve(value),
        }
    }
}

impl Serialize for UnitTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.qualified_name())
    }
}

impl<'de> Deserialize<'de> for UnitTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Resolves a raw unit symbol, case-insensitively, against every family in
/// [`UnitFamily::RESOLUTION_ORDER`].
pub fn resolve(symbol: &str) -> Result<UnitTag, UnitError> {
    UnitFamily::RESOLUTION_ORDER
        .iter()
        .find_map(|family| family.lookup(symbol))
        .ok_or_else(|| UnitError::NotRecognized(symbol.to_string()))
}

/// Anything carrying a value expressed in a [`UnitTag`].
pub trait Measured {
    fn value(&self) -> f64;
    fn unit(&self) -> UnitTag;
    fn set_measurement(&mut self, value: f64, unit: UnitTag);

    /// Rewrites the value and unit into the family's canonical unit.
    fn normalize(&mut self) {
        let (value, unit) = self.unit().to_canonical(self.value());
        self.set_measurement(value, unit);
    }
}
