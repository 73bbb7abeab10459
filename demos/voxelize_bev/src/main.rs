use argh::FromArgs;
use std::path::{Path, PathBuf};

use lidarvox::grid::VoxelGrid;
use lidarvox::render::{bev_to_image, density_bev, draw_bev_box, BevBox};
use lidarvox::voxelize::{VoxelValues, VoxelizationType, Voxelizer, DEFAULT_MAX_NUM_PTS};
use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(FromArgs)]
/// Voxelize a point cloud and write its bird's-eye view to an image
struct Args {
    /// path to a JSON voxelizer config
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// path to a text point cloud with one `x y z [features...]` row per line
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// number of synthetic points when no input is given
    #[argh(option, short = 'n', default = "50_000")]
    num_points: usize,

    /// seed of the synthetic point cloud
    #[argh(option, default = "0")]
    seed: u64,

    /// path to the output png image
    #[argh(option, short = 'o')]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let voxelizer = match &args.config {
        Some(path) => Voxelizer::from_json_file(path)?,
        None => Voxelizer::new(
            VoxelGrid::new([400, 400, 1], [-50.0, -50.0, -3.0], [50.0, 50.0, 3.0])?,
            VoxelizationType::Concatenate {
                max_num_pts: DEFAULT_MAX_NUM_PTS,
            },
        ),
    };

    let (points, features, boxes) = match &args.input {
        Some(path) => {
            let (points, features) = read_text_cloud(path)?;
            (points, features, Vec::new())
        }
        None => synthetic_sweep(args.num_points, args.seed),
    };
    log::info!(
        "loaded {} points with {} features",
        points.len(),
        features.ncols()
    );

    let voxels = voxelizer.voxelize(&points, features.view())?;
    log::info!(
        "{} of {} points inside the grid, {} occupied voxels",
        voxels.num_valid_points(),
        points.len(),
        voxels.len()
    );
    if let VoxelValues::Concatenated(values) = &voxels.values {
        let capacity = values.shape()[1];
        let num_truncated = voxels.counts.iter().filter(|&&c| c > capacity).count();
        log::info!("{num_truncated} voxels exceed {capacity} points");
    }

    let grid = voxelizer.grid;
    let bev = density_bev(&voxels.indices, &voxels.counts, grid.dims());
    let mut img = bev_to_image(bev.view());
    for bbox in boxes.iter() {
        draw_bev_box(&mut img, &grid, bbox, [0, 0, 255], 1)?;
    }

    let (width, height) = (img.cols() as u32, img.rows() as u32);
    let rgb = image::RgbImage::from_raw(width, height, img.to_vec())
        .ok_or("image buffer does not match its size")?;
    rgb.save(&args.output)?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}

fn read_text_cloud(path: &Path) -> Result<(Vec<[f64; 3]>, Array2<f32>), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;

    let mut points = Vec::new();
    let mut features = Vec::new();
    let mut num_features = None;

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let values = line
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() < 3 {
            return Err(format!("line {}: expected at least 3 values", lineno + 1).into());
        }

        let width = values.len() - 3;
        if *num_features.get_or_insert(width) != width {
            return Err(format!("line {}: inconsistent number of features", lineno + 1).into());
        }

        points.push([values[0], values[1], values[2]]);
        features.extend(values[3..].iter().map(|&v| v as f32));
    }

    let features = Array2::from_shape_vec((points.len(), num_features.unwrap_or(0)), features)?;
    Ok((points, features))
}

// ground plane returns plus a few box-shaped objects, with intensity as the only feature
fn synthetic_sweep(num_points: usize, seed: u64) -> (Vec<[f64; 3]>, Array2<f32>, Vec<BevBox>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let boxes = (0..6)
        .map(|_| BevBox {
            center_m: [rng.random_range(-40.0..40.0), rng.random_range(-40.0..40.0)],
            size_m: [rng.random_range(3.0..6.0), rng.random_range(1.5..2.5)],
            yaw_rad: rng.random_range(-std::f64::consts::PI..std::f64::consts::PI),
        })
        .collect::<Vec<_>>();

    let mut points = Vec::with_capacity(num_points);
    let mut intensity = Vec::with_capacity(num_points);
    for i in 0..num_points {
        if i % 4 == 0 {
            let bbox = &boxes[(i / 4) % boxes.len()];
            let (sin, cos) = bbox.yaw_rad.sin_cos();
            let x = rng.random_range(-0.5..0.5) * bbox.size_m[0];
            let y = rng.random_range(-0.5..0.5) * bbox.size_m[1];
            points.push([
                bbox.center_m[0] + x * cos - y * sin,
                bbox.center_m[1] + x * sin + y * cos,
                rng.random_range(-1.5..0.5),
            ]);
            intensity.push(rng.random_range(0.5..1.0f32));
        } else {
            let range = rng.random_range(2.0..70.0f64);
            let azimuth = rng.random_range(0.0..std::f64::consts::TAU);
            points.push([
                range * azimuth.cos(),
                range * azimuth.sin(),
                -1.8 + rng.random_range(-0.05..0.05),
            ]);
            intensity.push(rng.random_range(0.0..0.3f32));
        }
    }

    let features = Array2::from_shape_fn((intensity.len(), 1), |(i, _)| intensity[i]);
    (points, features, boxes)
}
