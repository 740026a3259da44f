use std::sync::Arc;

use dicom_mpr::{
    Crosshair, Cursor, CursorController, DisplayTransform, Plane, Session, ViewerEvent,
    VolumeError, VolumeStore,
};
use ndarray::{Array3, array};

fn ramp_volume(dim: (usize, usize, usize)) -> Arc<VolumeStore<u32>> {
    let data = Array3::from_shape_fn(dim, |(z, y, x)| (z * dim.1 * dim.2 + y * dim.2 + x) as u32);
    Arc::new(VolumeStore::new(data).unwrap())
}

fn assert_in_bounds(controller: &CursorController<u32>) {
    let (depth, height, width) = controller.volume().extents();
    let cursor = controller.cursor();
    assert!(cursor.x < width, "{cursor:?}");
    assert!(cursor.y < height, "{cursor:?}");
    assert!(cursor.z < depth, "{cursor:?}");
}

#[test]
fn test_cursor_stays_in_bounds() {
    let mut controller = CursorController::new(ramp_volume((3, 4, 5)));
    assert_in_bounds(&controller);
    for step in -6i64..12 {
        controller.set_cursor(step, -step, step * 3);
        assert_in_bounds(&controller);
        for plane in Plane::ALL {
            controller.on_click(plane, step * 2, 7 - step);
            assert_in_bounds(&controller);
            controller.set_slice_index(plane, step);
            assert_in_bounds(&controller);
        }
    }
}

#[test]
fn test_clamp_is_idempotent() {
    let mut controller = CursorController::new(ramp_volume((10, 10, 10)));
    let first = controller.set_cursor(-5, 20, 3);
    let second = controller.set_cursor(-5, 20, 3);
    assert_eq!(first, second);
    assert_eq!(first, Cursor::new(0, 9, 3));
}

#[test]
fn test_click_on_crosshair_is_noop() {
    let mut controller = CursorController::new(ramp_volume((4, 5, 6)));
    controller.set_cursor(3, 2, 1);
    let Crosshair {
        vertical,
        horizontal,
    } = controller.crosshair_for(Plane::Axial);
    controller.on_click(Plane::Axial, vertical as i64, horizontal as i64);
    assert_eq!(controller.cursor(), Cursor::new(3, 2, 1));
}

#[test]
fn test_click_on_crosshair_is_noop_everywhere() {
    let volume = ramp_volume((3, 4, 5));
    let session = Session::new(Arc::clone(&volume));
    let mut controller = CursorController::new(volume);
    for z in 0..3 {
        for y in 0..4 {
            for x in 0..5 {
                for plane in Plane::ALL {
                    controller.set_cursor(x, y, z);
                    let crosshair = controller.crosshair_for(plane);
                    controller.on_click(plane, crosshair.vertical as i64, crosshair.horizontal as i64);
                    let expected = Cursor::new(x as usize, y as usize, z as usize);
                    assert_eq!(controller.cursor(), expected, "{plane}");

                    session.apply(ViewerEvent::SetCursor { x, y, z }).unwrap();
                    let crosshair = session.snapshot().unwrap().plane(plane).crosshair;
                    let snapshot = session
                        .apply(ViewerEvent::Click {
                            plane,
                            x: crosshair.vertical as i64,
                            y: crosshair.horizontal as i64,
                        })
                        .unwrap();
                    assert_eq!(snapshot.cursor, expected, "{plane}");
                }
            }
        }
    }
}

#[test]
fn test_axial_click_propagates() {
    let volume = ramp_volume((4, 4, 4));
    let mut controller = CursorController::new(Arc::clone(&volume));
    controller.set_cursor(0, 0, 0);

    controller.on_click(Plane::Axial, 2, 1);
    // raw (row, col) = (4 - 1 - 1, 2) = (y, x)
    assert_eq!(controller.cursor(), Cursor::new(2, 2, 0));

    let coronal = volume.slice_coronal(2).unwrap();
    assert_eq!(
        controller.slice_for(Plane::Coronal),
        DisplayTransform::apply(&coronal)
    );
    let sagittal = volume.slice_sagittal(2).unwrap();
    assert_eq!(
        controller.slice_for(Plane::Sagittal),
        DisplayTransform::apply(&sagittal)
    );
    assert_eq!(
        controller.crosshair_for(Plane::Axial),
        Crosshair {
            vertical: 2,
            horizontal: 1
        }
    );
}

#[test]
fn test_displayed_axial_slice() {
    let data = array![[[0u8, 1, 2], [3, 4, 5]]];
    let mut controller = CursorController::new(Arc::new(VolumeStore::new(data).unwrap()));
    controller.set_cursor(0, 0, 0);
    let displayed = controller.slice_for(Plane::Axial);
    assert_eq!(displayed, array![[3u8, 0], [4, 1], [5, 2]]);
    assert_eq!(displayed.dim(), (3, 2));
}

#[test]
fn test_out_of_range_extraction() {
    let volume = ramp_volume((10, 10, 10));
    let mut controller = CursorController::new(Arc::clone(&volume));
    controller.set_cursor(1, 2, 3);

    assert_eq!(
        volume.slice_axial(10).unwrap_err(),
        VolumeError::IndexOutOfRange {
            plane: Plane::Axial,
            index: 10,
            extent: 10
        }
    );
    assert_eq!(controller.cursor(), Cursor::new(1, 2, 3));
    assert!(volume.slice_axial(9).is_ok());
}

#[test]
fn test_session_snapshot_matches_controller() {
    let volume = ramp_volume((4, 5, 6));
    let session = Session::new(Arc::clone(&volume));
    let mut controller = CursorController::new(volume);

    let events = [
        ViewerEvent::SetCursor { x: 5, y: 0, z: 2 },
        ViewerEvent::Click {
            plane: Plane::Sagittal,
            x: 3,
            y: 1,
        },
        ViewerEvent::SliceIndex {
            plane: Plane::Axial,
            index: -1,
        },
        ViewerEvent::Click {
            plane: Plane::Coronal,
            x: 9,
            y: 9,
        },
    ];
    for event in events {
        match event {
            ViewerEvent::SetCursor { x, y, z } => {
                controller.set_cursor(x, y, z);
            }
            ViewerEvent::Click { plane, x, y } => controller.on_click(plane, x, y),
            ViewerEvent::SliceIndex { plane, index } => {
                controller.set_slice_index(plane, index);
            }
        }
        let snapshot = session.apply(event).unwrap();
        assert_eq!(snapshot.cursor, controller.cursor());
        for plane in Plane::ALL {
            let view = snapshot.plane(plane);
            assert_eq!(view.index, controller.slice_index(plane));
            assert_eq!(view.slice, controller.slice_for(plane));
            assert_eq!(view.crosshair, controller.crosshair_for(plane));
        }
    }
}
