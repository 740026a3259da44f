use std::{error::Error, path::PathBuf, sync::Arc};

use clap::Parser;
use log::info;

use dicom_mpr::{
    Plane, Session, SortBy, ViewerEvent, render::plane_to_image, volume_loader::VolumeLoader,
};

#[derive(Debug, clap::ValueEnum, Clone, Copy)]
enum ArgSortBy {
    ImagePosition,
    TablePosition,
    InstanceNumber,
    /// Keep the file name order
    FileOrder,
}

impl From<ArgSortBy> for SortBy {
    fn from(arg: ArgSortBy) -> Self {
        match arg {
            ArgSortBy::ImagePosition => SortBy::ImagePositionPatient,
            ArgSortBy::TablePosition => SortBy::TablePosition,
            ArgSortBy::InstanceNumber => SortBy::InstanceNumber,
            ArgSortBy::FileOrder => SortBy::None,
        }
    }
}

/// Load a DICOM series, move the cursor and save the three planes as PNG.
#[derive(Parser, Debug)]
#[command(author, about, version)]
struct Args {
    /// Directory containing the .dcm files of one series
    dicom_dir: PathBuf,

    #[arg(long, value_enum, default_value = "image-position")]
    sort_by: ArgSortBy,

    /// Initial cursor as X,Y,Z voxel indices (defaults to the volume centre)
    #[arg(long, value_parser = parse_cursor)]
    cursor: Option<ViewerEvent>,

    /// Slider change as PLANE=INDEX, may be repeated
    #[arg(long = "index", value_parser = parse_slice_index)]
    indices: Vec<ViewerEvent>,

    /// Click in displayed coordinates as PLANE:X:Y, may be repeated
    #[arg(long = "click", value_parser = parse_click)]
    clicks: Vec<ViewerEvent>,

    /// Directory the snapshots are written to
    #[arg(short, long, default_value = ".")]
    out: PathBuf,
}

fn parse_int(value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse()
        .map_err(|e| format!("`{value}` is not an integer: {e}"))
}

fn parse_plane(value: &str) -> Result<Plane, String> {
    value.parse().map_err(|e| format!("{e}"))
}

fn parse_cursor(value: &str) -> Result<ViewerEvent, String> {
    let parts: Vec<&str> = value.split(',').collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected X,Y,Z, got `{value}`"));
    };
    Ok(ViewerEvent::SetCursor {
        x: parse_int(x)?,
        y: parse_int(y)?,
        z: parse_int(z)?,
    })
}

fn parse_slice_index(value: &str) -> Result<ViewerEvent, String> {
    let (plane, index) = value
        .split_once('=')
        .ok_or_else(|| format!("expected PLANE=INDEX, got `{value}`"))?;
    Ok(ViewerEvent::SliceIndex {
        plane: parse_plane(plane)?,
        index: parse_int(index)?,
    })
}

fn parse_click(value: &str) -> Result<ViewerEvent, String> {
    let parts: Vec<&str> = value.split(':').collect();
    let [plane, x, y] = parts.as_slice() else {
        return Err(format!("expected PLANE:X:Y, got `{value}`"));
    };
    Ok(ViewerEvent::Click {
        plane: parse_plane(plane)?,
        x: parse_int(x)?,
        y: parse_int(y)?,
    })
}

fn main() -> Result<(), Box<dyn Error + Sync + Send>> {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    let args = Args::parse();

    let volume = VolumeLoader::load_from_directory(&args.dicom_dir, args.sort_by.into())?;
    let session = Session::new(Arc::new(volume));

    let events = args.cursor.into_iter().chain(args.indices).chain(args.clicks);
    let mut snapshot = session.snapshot()?;
    for event in events {
        snapshot = session.apply(event)?;
        info!("{event:?} -> cursor {:?}", snapshot.cursor);
    }

    for view in &snapshot.planes {
        let image = plane_to_image(view).ok_or("slice does not fit an image buffer")?;
        let path = args.out.join(format!("{}.png", view.plane));
        image.save(&path)?;
        info!(
            "saved {} slice {} to {}",
            view.plane,
            view.index,
            path.display()
        );
    }

    Ok(())
}
