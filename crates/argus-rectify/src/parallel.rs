use rayon::prelude::*;

use argus_image::Image;

/// Apply a function to each output pixel and its remap entry, rows in parallel.
///
/// # Arguments
///
/// * `dst` - The output image container with shape (height, width, C).
/// * `map_x` - The x coordinates of the pixels to sample, row-major.
/// * `map_y` - The y coordinates of the pixels to sample, row-major.
/// * `f` - The function to apply to each (x, y, pixel) triple.
///
/// The map planes must have one entry per `dst` pixel; rows are split across
/// the global Rayon thread pool and each row writes only its own slice.
pub fn par_iter_rows_resample<const C: usize>(
    dst: &mut Image<f32, C>,
    map_x: &[f32],
    map_y: &[f32],
    f: impl Fn(f32, f32, &mut [f32]) + Send + Sync,
) {
    let cols = dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .zip(map_x.par_chunks_exact(cols))
        .zip(map_y.par_chunks_exact(cols))
        .for_each(|((dst_chunk, map_x_chunk), map_y_chunk)| {
            dst_chunk
                .chunks_exact_mut(C)
                .zip(map_x_chunk.iter().zip(map_y_chunk.iter()))
                .for_each(|(dst_pixel, (&x, &y))| {
                    f(x, y, dst_pixel);
                });
        });
}

/// Fill two row-major coordinate planes from a per-pixel function, rows in parallel.
///
/// # Arguments
///
/// * `cols` - The width of the planes.
/// * `map_x` - The x coordinate plane to fill, row-major.
/// * `map_y` - The y coordinate plane to fill, row-major.
/// * `f` - The function mapping a pixel position (u, v) to a coordinate pair.
pub fn par_fill_rows_map(
    cols: usize,
    map_x: &mut [f32],
    map_y: &mut [f32],
    f: impl Fn(usize, usize) -> (f32, f32) + Send + Sync,
) {
    map_x
        .par_chunks_exact_mut(cols)
        .zip(map_y.par_chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(v, (row_x, row_y))| {
            row_x
                .iter_mut()
                .zip(row_y.iter_mut())
                .enumerate()
                .for_each(|(u, (x, y))| {
                    let (sx, sy) = f(u, v);
                    *x = sx;
                    *y = sy;
                });
        });
}
