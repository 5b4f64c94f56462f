use argus_image::ImageSize;
use glam::{DVec2, DVec3};

use crate::camera::CameraModel;
use crate::error::RectifyError;
use crate::parallel;

/// Marker stored in both map planes for pixels with no valid source.
const INVALID: f32 = f32::NAN;

/// Dense per-output-pixel source coordinate lookup table.
///
/// One entry per output pixel, each either a sub-pixel (x, y) coordinate in
/// input image space or an invalid marker. The table depends only on the two
/// camera models, not on image content, so it is built once per camera pair
/// and reused across frames.
///
/// The coordinates are stored as two row-major planes (`map_x`, `map_y`),
/// the layout consumed by [`crate::resample::remap_image`].
pub struct RemapTable {
    size: ImageSize,
    map_x: Vec<f32>,
    map_y: Vec<f32>,
}

impl RemapTable {
    /// Build the remap table for a pair of camera models.
    ///
    /// For every output pixel the output camera back-projects to a 3d ray and
    /// the input camera projects that ray back to a sub-pixel source
    /// coordinate. Pixels where either step fails, or where the source falls
    /// outside the input image bounds, are marked invalid. This touches no
    /// image data; the result is a pure function of the two models.
    ///
    /// # Errors
    ///
    /// Returns an error if either camera reports a zero-area resolution.
    pub fn build(
        input: &dyn CameraModel,
        output: &dyn CameraModel,
    ) -> Result<Self, RectifyError> {
        let in_res = check_resolution(input.resolution())?;
        let out_res = check_resolution(output.resolution())?;

        let mut map_x = vec![INVALID; out_res.width * out_res.height];
        let mut map_y = vec![INVALID; out_res.width * out_res.height];

        parallel::par_fill_rows_map(out_res.width, &mut map_x, &mut map_y, |u, v| {
            match source_coordinate(input, in_res, output, u as f64, v as f64) {
                Some((x, y)) => (x, y),
                None => (INVALID, INVALID),
            }
        });

        let table = Self {
            size: out_res,
            map_x,
            map_y,
        };

        log::debug!(
            "remap table {} built, {:.1}% valid",
            table.size,
            table.valid_fraction() * 100.0
        );

        Ok(table)
    }

    /// Create a remap table from precomputed coordinate planes.
    ///
    /// Entry layout matches [`RemapTable::planes`], enabling callers to
    /// persist a built table and restore it without recomputation. Non-finite
    /// entries are treated as invalid.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is zero-area or the plane lengths do not
    /// match it.
    pub fn from_planes(
        size: ImageSize,
        map_x: Vec<f32>,
        map_y: Vec<f32>,
    ) -> Result<Self, RectifyError> {
        let size = check_resolution(size)?;
        let expected = size.width * size.height;
        if map_x.len() != expected {
            return Err(RectifyError::InvalidPlaneLength(map_x.len(), expected));
        }
        if map_y.len() != expected {
            return Err(RectifyError::InvalidPlaneLength(map_y.len(), expected));
        }

        Ok(Self { size, map_x, map_y })
    }

    /// The size of the table, equal to the output camera resolution.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The row-major x and y coordinate planes.
    pub fn planes(&self) -> (&[f32], &[f32]) {
        (&self.map_x, &self.map_y)
    }

    /// The source coordinate for the output pixel (u, v).
    ///
    /// Returns `None` for invalid entries and out-of-table positions.
    pub fn get(&self, u: usize, v: usize) -> Option<(f32, f32)> {
        if u >= self.size.width || v >= self.size.height {
            return None;
        }
        let idx = v * self.size.width + u;
        let (x, y) = (self.map_x[idx], self.map_y[idx]);
        if x.is_finite() && y.is_finite() {
            Some((x, y))
        } else {
            None
        }
    }

    /// The fraction of table entries with a valid source coordinate.
    pub fn valid_fraction(&self) -> f64 {
        let valid = self
            .map_x
            .iter()
            .zip(self.map_y.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .count();
        valid as f64 / self.map_x.len() as f64
    }
}

fn check_resolution(size: ImageSize) -> Result<ImageSize, RectifyError> {
    if size.width == 0 || size.height == 0 {
        return Err(RectifyError::InvalidResolution(size.width, size.height));
    }
    Ok(size)
}

/// Map one output pixel to its sub-pixel source coordinate.
fn source_coordinate(
    input: &dyn CameraModel,
    in_res: ImageSize,
    output: &dyn CameraModel,
    u: f64,
    v: f64,
) -> Option<(f32, f32)> {
    let ray: DVec3 = output.unproject(DVec2::new(u, v))?;
    let pixel = input.project(ray)?;

    if !pixel.x.is_finite() || !pixel.y.is_finite() {
        return None;
    }

    // sources outside the input image are misses, not clamped samples
    if pixel.x < 0.0
        || pixel.y < 0.0
        || pixel.x > (in_res.width - 1) as f64
        || pixel.y > (in_res.height - 1) as f64
    {
        return None;
    }

    Some((pixel.x as f32, pixel.y as f32))
}
