use std::sync::Arc;

use log::debug;
use ndarray::Array2;

use crate::enums::{Axis, Plane};
use crate::transform::DisplayTransform;
use crate::volume::VolumeStore;

/// The shared 3D position, in voxel indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Cursor {
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    pub fn get(&self, axis: Axis) -> usize {
        match axis {
            Axis::Z => self.z,
            Axis::Y => self.y,
            Axis::X => self.x,
        }
    }
}

/// Crosshair lines in displayed coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crosshair {
    /// Display x of the vertical line
    pub vertical: usize,
    /// Display y of the horizontal line
    pub horizontal: usize,
}

#[inline]
fn clamp_to_extent(value: i64, extent: usize) -> usize {
    // extents are >= 1, guaranteed by VolumeStore::new
    value.clamp(0, extent as i64 - 1) as usize
}

/// Owns the cursor and derives every plane's slice and crosshair from it.
#[derive(Debug, Clone)]
pub struct CursorController<T> {
    volume: Arc<VolumeStore<T>>,
    cursor: Cursor,
}

impl<T> CursorController<T> {
    /// Starts with the cursor at the centre of the volume.
    pub fn new(volume: Arc<VolumeStore<T>>) -> Self {
        let (depth, height, width) = volume.extents();
        let cursor = Cursor::new(width / 2, height / 2, depth / 2);
        Self { volume, cursor }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn volume(&self) -> &VolumeStore<T> {
        &self.volume
    }

    /// Moves the cursor, clamping every coordinate into the volume.
    pub fn set_cursor(&mut self, x: i64, y: i64, z: i64) -> Cursor {
        let (depth, height, width) = self.volume.extents();
        let cursor = Cursor::new(
            clamp_to_extent(x, width),
            clamp_to_extent(y, height),
            clamp_to_extent(z, depth),
        );
        if cursor != self.cursor {
            debug!(
                "cursor ({}, {}, {}) -> ({}, {}, {})",
                self.cursor.x, self.cursor.y, self.cursor.z, cursor.x, cursor.y, cursor.z
            );
        }
        self.cursor = cursor;
        cursor
    }

    /// Slider change: moves only the axis the plane holds fixed.
    pub fn set_slice_index(&mut self, plane: Plane, index: i64) -> Cursor {
        let mut coords = self.signed_coords();
        coords[plane.fixed_axis().index()] = index;
        self.set_cursor(coords[2], coords[1], coords[0])
    }

    /// The slice currently shown for the plane.
    pub fn slice_index(&self, plane: Plane) -> usize {
        self.cursor.get(plane.fixed_axis())
    }

    /// Raw (rows, columns) of the plane's slices.
    pub fn raw_shape(&self, plane: Plane) -> (usize, usize) {
        let (row, col) = plane.varying_axes();
        let dim = self.volume.extents();
        let dim = [dim.0, dim.1, dim.2];
        (dim[row.index()], dim[col.index()])
    }

    pub fn crosshair_for(&self, plane: Plane) -> Crosshair {
        let (row, col) = plane.varying_axes();
        let raw_point = (self.cursor.get(row), self.cursor.get(col));
        let (vertical, horizontal) = DisplayTransform::forward(raw_point, self.raw_shape(plane));
        Crosshair {
            vertical,
            horizontal,
        }
    }

    /// Maps a click in the plane's displayed space back onto the cursor.
    ///
    /// The plane's fixed axis keeps its value, clicks off the canvas clamp to
    /// the nearest voxel.
    pub fn on_click(&mut self, plane: Plane, display_x: i64, display_y: i64) {
        let (raw_row, raw_col) =
            DisplayTransform::inverse((display_x, display_y), self.raw_shape(plane));
        let (row, col) = plane.varying_axes();

        let mut coords = self.signed_coords();
        coords[row.index()] = raw_row;
        coords[col.index()] = raw_col;
        debug!("{plane} click at ({display_x}, {display_y})");
        self.set_cursor(coords[2], coords[1], coords[0]);
    }

    // (z, y, x), ordered like Axis::index
    fn signed_coords(&self) -> [i64; 3] {
        [
            self.cursor.z as i64,
            self.cursor.y as i64,
            self.cursor.x as i64,
        ]
    }
}

impl<T: Clone> CursorController<T> {
    /// The displayed slice for the plane at the current cursor.
    pub fn slice_for(&self, plane: Plane) -> Array2<T> {
        let raw = self.volume.slice_from_axis(self.slice_index(plane), plane);
        DisplayTransform::apply(&raw)
    }
}
