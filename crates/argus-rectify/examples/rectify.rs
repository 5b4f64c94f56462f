//! Rectify a synthetic wide-angle frame into a narrower pinhole view.

use std::sync::Arc;

use argus_image::{Image, ImageSize};
use argus_rectify::{MappedUndistorter, PinholeCamera, Undistorter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let size = ImageSize {
        width: 320,
        height: 240,
    };
    let cx = (size.width as f64 - 1.0) / 2.0;
    let cy = (size.height as f64 - 1.0) / 2.0;

    // the rectified view is wider than the raw one, so the borders stay unmapped
    let input_camera = Arc::new(PinholeCamera::new(120.0, 120.0, cx, cy, size));
    let output_camera = Arc::new(PinholeCamera::new(90.0, 90.0, cx, cy, size));

    let undistorter = MappedUndistorter::new(input_camera, output_camera)?;

    // synthetic u8 checkerboard, converted to the f32 range the resampler consumes
    let mut data = vec![0u8; size.width * size.height];
    for v in 0..size.height {
        for u in 0..size.width {
            if (u / 16 + v / 16) % 2 == 0 {
                data[v * size.width + u] = 255;
            }
        }
    }
    let src = Image::<u8, 1>::new(size, data)?.cast_and_scale::<f32>(1.0 / 255.0)?;

    let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;
    undistorter.process_image(&src, &mut dst)?;

    println!(
        "rectified {} -> {}, coverage {:.1}%",
        undistorter.input_camera().resolution(),
        undistorter.output_camera().resolution(),
        undistorter.table().valid_fraction() * 100.0
    );

    Ok(())
}
