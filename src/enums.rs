use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One of the three orthogonal viewing planes.
///
/// Each plane fixes one volume axis and varies the other two:
///
/// | Plane    | Fixed | Raw rows | Raw columns |
/// |----------|-------|----------|-------------|
/// | Axial    | z     | y        | x           |
/// | Coronal  | y     | z        | x           |
/// | Sagittal | x     | z        | y           |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Plane {
    Axial,
    Coronal,
    Sagittal,
}

/// A volume axis, named after the coordinate it indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Z,
    Y,
    X,
}

impl Axis {
    /// Position of the axis in a (z, y, x) indexed array
    pub fn index(self) -> usize {
        match self {
            Axis::Z => 0,
            Axis::Y => 1,
            Axis::X => 2,
        }
    }
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::Axial, Plane::Coronal, Plane::Sagittal];

    /// The axis held constant while the plane is shown
    pub fn fixed_axis(self) -> Axis {
        match self {
            Plane::Axial => Axis::Z,
            Plane::Coronal => Axis::Y,
            Plane::Sagittal => Axis::X,
        }
    }

    /// The volume axes backing the raw slice's (row, column)
    pub fn varying_axes(self) -> (Axis, Axis) {
        match self {
            Plane::Axial => (Axis::Y, Axis::X),
            Plane::Coronal => (Axis::Z, Axis::X),
            Plane::Sagittal => (Axis::Z, Axis::Y),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Plane::Axial => "axial",
            Plane::Coronal => "coronal",
            Plane::Sagittal => "sagittal",
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown plane `{0}`, expected axial, coronal or sagittal")]
pub struct ParsePlaneError(pub String);

impl FromStr for Plane {
    type Err = ParsePlaneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "axial" | "a" => Ok(Plane::Axial),
            "coronal" | "c" => Ok(Plane::Coronal),
            "sagittal" | "s" => Ok(Plane::Sagittal),
            _ => Err(ParsePlaneError(s.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    ImagePositionPatient,
    TablePosition,
    InstanceNumber,
    None,
}
