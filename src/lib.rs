//! # DICOM-MPR library
//!
//! Multiplanar reconstruction of a volume with one shared 3D cursor.
//!
//! The volume is shown in the three medical planes:
//!  - Axial (fixes z)
//!  - Coronal (fixes y)
//!  - Sagittal (fixes x)
//!
//! Every displayed slice is the raw slice rotated 90° clockwise. A click in
//! any plane is mapped back through the inverse of that rotation onto the
//! cursor, and every plane's slice index and crosshair is derived from the
//! cursor on demand, so the three views can never disagree.
//!
//! The core ([`VolumeStore`], [`CursorController`]) does no I/O. A DICOM
//! series loader and a snapshot renderer live next to it for applications
//! that want them.
//!
//! # Examples
//!
//! ## Clicking in one plane moves the others
//!
//! ```
//! # use dicom_mpr::{CursorController, Plane, VolumeStore};
//! # use ndarray::Array3;
//! # use std::sync::Arc;
//! let volume = VolumeStore::new(Array3::<u16>::zeros((4, 4, 4)))
//!     .expect("volume should not be empty");
//! let mut controller = CursorController::new(Arc::new(volume));
//! controller.set_cursor(0, 0, 0);
//!
//! controller.on_click(Plane::Axial, 2, 1);
//! let cursor = controller.cursor();
//! assert_eq!((cursor.x, cursor.y, cursor.z), (2, 2, 0));
//! assert_eq!(controller.slice_index(Plane::Coronal), 2);
//! ```
//!
//! ## Loading a DICOM series
//!
//! ```no_run
//! # use dicom_mpr::{Session, SortBy, VolumeLoader};
//! # use std::sync::Arc;
//! let volume = VolumeLoader::load_from_directory("dicom", SortBy::InstanceNumber)
//!     .expect("should have loaded files from directory");
//! let session = Session::new(Arc::new(volume));
//! let snapshot = session.snapshot().expect("session lock should not be poisoned");
//! ```

pub mod cursor;
pub mod enums;
pub mod render;
pub mod session;
pub mod transform;
pub mod volume;
pub mod volume_loader;

pub use cursor::{Crosshair, Cursor, CursorController};
pub use enums::{Plane, SortBy};
pub use session::{PlaneView, Session, SessionError, ViewSnapshot, ViewerEvent};
pub use transform::DisplayTransform;
pub use volume::{VolumeError, VolumeStore};
pub use volume_loader::{VolumeLoader, VolumeLoaderError};
