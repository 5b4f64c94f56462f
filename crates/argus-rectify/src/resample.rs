use argus_image::Image;

use crate::error::RectifyError;
use crate::interpolation::{interpolate_pixel, InterpolationMode};
use crate::parallel;
use crate::remap::RemapTable;

/// Resample an image through a precomputed remap table.
///
/// For each output pixel the table entry selects the sub-pixel source
/// coordinate to interpolate at; invalid entries receive `fill` in every
/// channel. Multi-channel images are interpolated per channel identically.
/// This is the per-frame cost of rectification; the table itself is reused
/// across frames.
///
/// # Arguments
///
/// * `src` - The input image container with shape (height, width, C).
/// * `dst` - The output image container, sized to the remap table.
/// * `table` - The remap table with one source coordinate per output pixel.
/// * `fill` - The value written to every channel of unmapped pixels.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// * The output image must have the same size as the remap table.
/// * The input image must be non-empty.
pub fn remap_image<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    table: &RemapTable,
    fill: f32,
    interpolation: InterpolationMode,
) -> Result<(), RectifyError> {
    if dst.size() != table.size() {
        return Err(RectifyError::InvalidImageSize(
            table.size().width,
            table.size().height,
            dst.width(),
            dst.height(),
        ));
    }

    if src.cols() == 0 || src.rows() == 0 {
        return Err(RectifyError::InvalidResolution(src.cols(), src.rows()));
    }

    let (map_x, map_y) = table.planes();

    parallel::par_iter_rows_resample(dst, map_x, map_y, |x, y, dst_pixel| {
        if x.is_finite() && y.is_finite() {
            let pixel = interpolate_pixel(src, x, y, interpolation);
            dst_pixel.copy_from_slice(&pixel);
        } else {
            dst_pixel.fill(fill);
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use argus_image::{Image, ImageSize};

    use crate::error::RectifyError;
    use crate::interpolation::InterpolationMode;
    use crate::remap::RemapTable;

    #[test]
    fn remap_smoke() -> Result<(), RectifyError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 2,
        };

        let table = RemapTable::from_planes(
            new_size,
            vec![0.0, 2.0, 0.0, 2.0],
            vec![0.0, 0.0, 2.0, 2.0],
        )?;

        let mut image_transformed = Image::<f32, 1>::from_size_val(new_size, -1.0)?;

        super::remap_image(
            &image,
            &mut image_transformed,
            &table,
            0.0,
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(image_transformed.as_slice(), &[0.0, 2.0, 6.0, 8.0]);

        Ok(())
    }

    #[test]
    fn remap_writes_fill_for_invalid_entries() -> Result<(), RectifyError> {
        let image = Image::<f32, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            7.0,
        )?;

        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let table = RemapTable::from_planes(
            size,
            vec![f32::NAN, 1.0],
            vec![f32::NAN, 1.0],
        )?;

        let mut dst = Image::<f32, 3>::from_size_val(size, -1.0)?;

        super::remap_image(&image, &mut dst, &table, 0.5, InterpolationMode::Bilinear)?;

        assert_eq!(dst.as_slice(), &[0.5, 0.5, 0.5, 7.0, 7.0, 7.0]);

        Ok(())
    }

    #[test]
    fn remap_interpolates_within_sample_range() -> Result<(), RectifyError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1.0, 3.0, 5.0, 9.0],
        )?;

        let size = ImageSize {
            width: 1,
            height: 1,
        };
        let table = RemapTable::from_planes(size, vec![0.25], vec![0.75])?;

        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;
        super::remap_image(&image, &mut dst, &table, 0.0, InterpolationMode::Bilinear)?;

        let value = dst.as_slice()[0];
        // weighted average of the four neighbors, inside their value range
        assert!(value >= 1.0 && value <= 9.0);
        let expected = 1.0 * 0.75 * 0.25
            + 3.0 * 0.25 * 0.25
            + 5.0 * 0.75 * 0.75
            + 9.0 * 0.25 * 0.75;
        assert!((value - expected).abs() < 1e-6);

        Ok(())
    }

    #[test]
    fn remap_rejects_size_mismatch() -> Result<(), RectifyError> {
        let image = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0.0,
        )?;

        let table = RemapTable::from_planes(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0; 4],
            vec![0.0; 4],
        )?;

        let mut dst = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0.0,
        )?;

        let result = super::remap_image(
            &image,
            &mut dst,
            &table,
            0.0,
            InterpolationMode::Bilinear,
        );
        assert!(matches!(
            result,
            Err(RectifyError::InvalidImageSize(2, 2, 3, 2))
        ));

        Ok(())
    }

    #[test]
    fn remap_nearest_mode() -> Result<(), RectifyError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0, 1.0, 2.0, 3.0],
        )?;

        let size = ImageSize {
            width: 1,
            height: 1,
        };
        let table = RemapTable::from_planes(size, vec![0.9], vec![0.2])?;

        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;
        super::remap_image(&image, &mut dst, &table, 0.0, InterpolationMode::Nearest)?;

        assert_eq!(dst.as_slice(), &[1.0]);

        Ok(())
    }
}
