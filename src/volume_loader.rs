use crate::{
    enums::SortBy,
    volume::{VolumeError, VolumeStore},
};

use dicom::{
    object::{FileDicomObject, InMemDicomObject, open_file},
    pixeldata::{ConvertOptions, PixelDecoder, VoiLutOption},
};
use dicom_dictionary_std::tags;
use log::{debug, info, warn};
use ndarray::{Array2, Array3, ArrayView2, Axis, s};
use rayon::prelude::*;
use std::{cmp::Ordering, fs, path::Path};
use thiserror::Error;

type DicomFile = FileDicomObject<InMemDicomObject>;

#[derive(Debug, Error)]
pub enum VolumeLoaderError {
    #[error("No valid DICOM images found")]
    NoValidImages,

    #[error("Inconsistent image dimensions")]
    InconsistentDimensions,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Volume error: {0}")]
    Volume(#[from] VolumeError),
}

/// Builds a [`VolumeStore`] from one DICOM series.
pub struct VolumeLoader;

impl VolumeLoader {
    /// Load a volume from DICOM objects
    ///
    /// Only objects of the first series encountered are used; objects of
    /// other series and objects without decodable pixel data are skipped.
    ///
    /// # Errors
    ///
    /// Returns error if no valid images are found or their dimensions differ
    pub fn load_from_dicom_objects(
        dicom_objects: &[DicomFile],
        sort_by: SortBy,
    ) -> Result<VolumeStore<u16>, VolumeLoaderError> {
        let members = Self::series_members(dicom_objects);

        let mut decoded: Vec<(Option<f32>, Array2<u16>)> = members
            .par_iter()
            .filter_map(|dicom_object| {
                let image = Self::decode_first_frame(dicom_object)?;
                Some((Self::slice_order(dicom_object, sort_by), image))
            })
            .collect();

        if decoded.is_empty() {
            return Err(VolumeLoaderError::NoValidImages);
        }
        if decoded.len() < members.len() {
            warn!(
                "skipped {} objects without decodable pixel data",
                members.len() - decoded.len()
            );
        }

        sort_by_order(&mut decoded, sort_by);

        let images: Vec<ArrayView2<'_, u16>> =
            decoded.iter().map(|(_, image)| image.view()).collect();
        let data = stack_images(&images)?;
        info!("loaded volume {:?} (depth, height, width)", data.dim());

        Ok(VolumeStore::new(data)?)
    }

    /// Load a volume from file paths
    ///
    /// Files that cannot be parsed as DICOM are skipped with a warning.
    pub fn load_from_file_paths(
        paths: &[impl AsRef<Path> + Sync],
        sort_by: SortBy,
    ) -> Result<VolumeStore<u16>, VolumeLoaderError> {
        let objects: Vec<_> = paths
            .par_iter()
            .filter_map(|path| match open_file(path.as_ref()) {
                Ok(dicom_object) => Some(dicom_object),
                Err(e) => {
                    warn!("skipping {}: {e}", path.as_ref().display());
                    None
                }
            })
            .collect();

        Self::load_from_dicom_objects(&objects, sort_by)
    }

    /// Load a volume from a directory containing .dcm files
    pub fn load_from_directory(
        path: impl AsRef<Path>,
        sort_by: SortBy,
    ) -> Result<VolumeStore<u16>, VolumeLoaderError> {
        let mut paths: Vec<_> = fs::read_dir(path.as_ref())?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("dcm"))
            })
            .collect();

        if paths.is_empty() {
            return Err(VolumeLoaderError::NoValidImages);
        }
        // directory order is platform dependent
        paths.sort();
        info!("reading {} files from {}", paths.len(), path.as_ref().display());

        Self::load_from_file_paths(&paths, sort_by)
    }

    fn series_members(dicom_objects: &[DicomFile]) -> Vec<&DicomFile> {
        let Some(series) = dicom_objects.iter().find_map(Self::series_uid) else {
            return dicom_objects.iter().collect();
        };
        debug!("using series {series}");

        let members: Vec<_> = dicom_objects
            .iter()
            .filter(|dicom_object| {
                Self::series_uid(dicom_object).is_none_or(|uid| uid == series)
            })
            .collect();
        if members.len() < dicom_objects.len() {
            warn!(
                "skipped {} objects from other series",
                dicom_objects.len() - members.len()
            );
        }
        members
    }

    fn series_uid(dicom_object: &DicomFile) -> Option<String> {
        let uid = dicom_object
            .element(tags::SERIES_INSTANCE_UID)
            .ok()?
            .to_str()
            .ok()?;
        let uid = clean_uid(&uid);
        (!uid.is_empty()).then(|| uid.to_owned())
    }

    fn slice_order(dicom_object: &DicomFile, sort_by: SortBy) -> Option<f32> {
        match sort_by {
            SortBy::ImagePositionPatient => dicom_object
                .element(tags::IMAGE_POSITION_PATIENT)
                .ok()?
                .to_multi_float32()
                .ok()?
                .get(2)
                .copied(),
            SortBy::TablePosition => dicom_object
                .element(tags::TABLE_POSITION)
                .ok()?
                .to_float32()
                .ok(),
            SortBy::InstanceNumber => dicom_object
                .element(tags::INSTANCE_NUMBER)
                .ok()?
                .to_int::<i32>()
                .ok()
                .map(|n| n as f32),
            SortBy::None => None,
        }
    }

    fn decode_first_frame(dicom_object: &DicomFile) -> Option<Array2<u16>> {
        let pixel_data = dicom_object.decode_pixel_data().ok()?;
        let options = ConvertOptions::new().with_voi_lut(VoiLutOption::First);
        pixel_data
            .to_ndarray_with_options::<u16>(&options)
            .ok()
            .map(|frames| frames.slice_move(s![0, .., .., 0]))
    }
}

fn clean_uid(uid: &str) -> &str {
    uid.trim_end_matches(['\0', ' '])
}

/// Stable sort by the order key; patient positions run head first.
fn sort_by_order<T>(items: &mut [(Option<f32>, T)], sort_by: SortBy) {
    if matches!(sort_by, SortBy::None) {
        return;
    }
    items.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    if matches!(sort_by, SortBy::ImagePositionPatient) {
        items.reverse();
    }
}

fn stack_images(images: &[ArrayView2<'_, u16>]) -> Result<Array3<u16>, VolumeLoaderError> {
    let Some(first) = images.first() else {
        return Err(VolumeLoaderError::NoValidImages);
    };
    if images.iter().any(|image| image.dim() != first.dim()) {
        return Err(VolumeLoaderError::InconsistentDimensions);
    }
    ndarray::stack(Axis(0), images).map_err(|_| VolumeLoaderError::InconsistentDimensions)
}
