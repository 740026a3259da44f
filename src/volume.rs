use crate::enums::Plane;

use ndarray::Array3;
use ndarray::ArrayView2;
use ndarray::s;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VolumeError {
    #[error("Volume has an empty extent: {0:?}")]
    EmptyVolume((usize, usize, usize)),

    #[error("{plane} slice index {index} is outside 0..{extent}")]
    IndexOutOfRange {
        plane: Plane,
        index: usize,
        extent: usize,
    },
}

/// Immutable voxel data indexed (z, y, x).
#[derive(Debug, Clone)]
pub struct VolumeStore<T> {
    data: Array3<T>,
}

impl<T> VolumeStore<T> {
    pub fn new(data: Array3<T>) -> Result<Self, VolumeError> {
        let dim = data.dim();
        if dim.0 == 0 || dim.1 == 0 || dim.2 == 0 {
            return Err(VolumeError::EmptyVolume(dim));
        }
        Ok(Self { data })
    }

    /// Get the extents of the volume (depth, height, width)
    pub fn extents(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Get a reference to the underlying data
    pub fn data(&self) -> &Array3<T> {
        &self.data
    }

    /// Extent of the axis the plane holds fixed, i.e. the number of slices
    pub fn extent_along(&self, plane: Plane) -> usize {
        let dim = self.data.dim();
        match plane {
            Plane::Axial => dim.0,
            Plane::Coronal => dim.1,
            Plane::Sagittal => dim.2,
        }
    }

    /// `volume[z, :, :]`, shape (Y, X)
    pub fn slice_axial(&self, z: usize) -> Result<ArrayView2<'_, T>, VolumeError> {
        self.slice(Plane::Axial, z)
    }

    /// `volume[:, y, :]`, shape (Z, X)
    pub fn slice_coronal(&self, y: usize) -> Result<ArrayView2<'_, T>, VolumeError> {
        self.slice(Plane::Coronal, y)
    }

    /// `volume[:, :, x]`, shape (Z, Y)
    pub fn slice_sagittal(&self, x: usize) -> Result<ArrayView2<'_, T>, VolumeError> {
        self.slice(Plane::Sagittal, x)
    }

    pub fn slice(&self, plane: Plane, index: usize) -> Result<ArrayView2<'_, T>, VolumeError> {
        let extent = self.extent_along(plane);
        if index >= extent {
            return Err(VolumeError::IndexOutOfRange {
                plane,
                index,
                extent,
            });
        }
        Ok(self.slice_from_axis(index, plane))
    }

    // Callers must have checked `index` against `extent_along(plane)`.
    pub(crate) fn slice_from_axis(&self, index: usize, plane: Plane) -> ArrayView2<'_, T> {
        match plane {
            Plane::Axial => self.data.slice(s![index, .., ..]),
            Plane::Coronal => self.data.slice(s![.., index, ..]),
            Plane::Sagittal => self.data.slice(s![.., .., index]),
        }
    }
}
