use std::sync::{Arc, Mutex, MutexGuard};

use ndarray::Array2;
use thiserror::Error;

use crate::cursor::{Crosshair, Cursor, CursorController};
use crate::enums::Plane;
use crate::volume::VolumeStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session lock poisoned by a panicking thread")]
    Poisoned,
}

/// Input from the UI adapter, already in slice index space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerEvent {
    Click { plane: Plane, x: i64, y: i64 },
    SliceIndex { plane: Plane, index: i64 },
    SetCursor { x: i64, y: i64, z: i64 },
}

/// Everything a renderer needs to redraw one plane.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneView<T> {
    pub plane: Plane,
    pub index: usize,
    pub slice: Array2<T>,
    pub crosshair: Crosshair,
}

/// All three planes captured from the same cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSnapshot<T> {
    pub cursor: Cursor,
    pub planes: [PlaneView<T>; 3],
}

impl<T> ViewSnapshot<T> {
    pub fn plane(&self, plane: Plane) -> &PlaneView<T> {
        match plane {
            Plane::Axial => &self.planes[0],
            Plane::Coronal => &self.planes[1],
            Plane::Sagittal => &self.planes[2],
        }
    }
}

/// One viewing session: a volume plus its cursor behind a single lock.
///
/// Events and the following three-plane read happen under one lock
/// acquisition, so a renderer on another thread never sees a half-applied
/// click.
pub struct Session<T> {
    controller: Mutex<CursorController<T>>,
}

impl<T: Clone> Session<T> {
    pub fn new(volume: Arc<VolumeStore<T>>) -> Self {
        Self {
            controller: Mutex::new(CursorController::new(volume)),
        }
    }

    pub fn cursor(&self) -> Result<Cursor, SessionError> {
        Ok(self.lock()?.cursor())
    }

    pub fn apply(&self, event: ViewerEvent) -> Result<ViewSnapshot<T>, SessionError> {
        let mut controller = self.lock()?;
        match event {
            ViewerEvent::Click { plane, x, y } => controller.on_click(plane, x, y),
            ViewerEvent::SliceIndex { plane, index } => {
                controller.set_slice_index(plane, index);
            }
            ViewerEvent::SetCursor { x, y, z } => {
                controller.set_cursor(x, y, z);
            }
        }
        Ok(Self::capture(&controller))
    }

    pub fn snapshot(&self) -> Result<ViewSnapshot<T>, SessionError> {
        let controller = self.lock()?;
        Ok(Self::capture(&controller))
    }

    fn lock(&self) -> Result<MutexGuard<'_, CursorController<T>>, SessionError> {
        self.controller.lock().map_err(|_| SessionError::Poisoned)
    }

    fn capture(controller: &CursorController<T>) -> ViewSnapshot<T> {
        let view = |plane: Plane| PlaneView {
            plane,
            index: controller.slice_index(plane),
            slice: controller.slice_for(plane),
            crosshair: controller.crosshair_for(plane),
        };
        ViewSnapshot {
            cursor: controller.cursor(),
            planes: Plane::ALL.map(view),
        }
    }
}
