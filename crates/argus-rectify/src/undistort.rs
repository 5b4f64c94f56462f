use std::sync::Arc;

use argus_image::{Image, ImageSize};

use crate::camera::CameraModel;
use crate::error::RectifyError;
use crate::interpolation::InterpolationMode;
use crate::remap::RemapTable;
use crate::resample::remap_image;

/// Uniform per-frame rectification contract.
///
/// An undistorter binds a fixed (input camera, output camera) pair at
/// construction and converts raw frames described by the input camera into
/// frames described by the output camera. Implementations are immutable after
/// construction: `process_image` has no side effects beyond the output buffer,
/// so one instance may serve multiple frame threads concurrently as long as
/// each call supplies its own output image.
pub trait Undistorter<const C: usize>: Send + Sync {
    /// Produce a rectified image from a raw input image.
    ///
    /// The input must match the input camera resolution and the output buffer
    /// the output camera resolution; per-pixel projection misses are rendered
    /// as fill pixels, never surfaced as errors.
    fn process_image(
        &self,
        src: &Image<f32, C>,
        dst: &mut Image<f32, C>,
    ) -> Result<(), RectifyError>;

    /// The camera describing the geometry of images passed to `process_image`.
    fn input_camera(&self) -> &Arc<dyn CameraModel>;

    /// The camera describing the geometry of images produced by `process_image`.
    fn output_camera(&self) -> &Arc<dyn CameraModel>;
}

/// Undistorter backed by a precomputed remap table.
///
/// The table is built eagerly exactly once at construction and cached for the
/// lifetime of the instance, so the per-frame cost is a single resampling
/// pass.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use argus_image::{Image, ImageSize};
/// use argus_rectify::{MappedUndistorter, PinholeCamera, Undistorter};
///
/// let size = ImageSize {
///     width: 8,
///     height: 6,
/// };
/// let camera = Arc::new(PinholeCamera::new(10.0, 10.0, 3.5, 2.5, size));
///
/// let undistorter = MappedUndistorter::new(camera.clone(), camera).unwrap();
///
/// let src = Image::<f32, 1>::from_size_val(size, 0.5).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(size, 0.0).unwrap();
/// undistorter.process_image(&src, &mut dst).unwrap();
/// ```
pub struct MappedUndistorter {
    input_camera: Arc<dyn CameraModel>,
    output_camera: Arc<dyn CameraModel>,
    table: RemapTable,
    fill: f32,
    interpolation: InterpolationMode,
}

impl MappedUndistorter {
    /// Create an undistorter for a camera pair with the default fill value
    /// (0.0) and bilinear interpolation.
    ///
    /// # Errors
    ///
    /// Returns an error if either camera reports a zero-area resolution.
    pub fn new(
        input_camera: Arc<dyn CameraModel>,
        output_camera: Arc<dyn CameraModel>,
    ) -> Result<Self, RectifyError> {
        Self::with_options(
            input_camera,
            output_camera,
            0.0,
            InterpolationMode::Bilinear,
        )
    }

    /// Create an undistorter with an explicit fill value and interpolation mode.
    ///
    /// # Errors
    ///
    /// Returns an error if either camera reports a zero-area resolution.
    pub fn with_options(
        input_camera: Arc<dyn CameraModel>,
        output_camera: Arc<dyn CameraModel>,
        fill: f32,
        interpolation: InterpolationMode,
    ) -> Result<Self, RectifyError> {
        let table = RemapTable::build(input_camera.as_ref(), output_camera.as_ref())?;
        Ok(Self {
            input_camera,
            output_camera,
            table,
            fill,
            interpolation,
        })
    }

    /// The cached remap table.
    pub fn table(&self) -> &RemapTable {
        &self.table
    }

    /// The camera describing the geometry of raw input images.
    pub fn input_camera(&self) -> &Arc<dyn CameraModel> {
        &self.input_camera
    }

    /// The camera describing the geometry of rectified output images.
    pub fn output_camera(&self) -> &Arc<dyn CameraModel> {
        &self.output_camera
    }
}

impl<const C: usize> Undistorter<C> for MappedUndistorter {
    fn process_image(
        &self,
        src: &Image<f32, C>,
        dst: &mut Image<f32, C>,
    ) -> Result<(), RectifyError> {
        check_image_size(src.size(), self.input_camera.resolution())?;
        check_image_size(dst.size(), self.output_camera.resolution())?;
        remap_image(src, dst, &self.table, self.fill, self.interpolation)
    }

    fn input_camera(&self) -> &Arc<dyn CameraModel> {
        &self.input_camera
    }

    fn output_camera(&self) -> &Arc<dyn CameraModel> {
        &self.output_camera
    }
}

/// Undistorter that leaves image data untouched.
///
/// The trivial variant of the contract for pipelines where the raw and
/// rectified geometries coincide; both cameras are the same model and
/// `process_image` is a validated copy.
pub struct PassthroughUndistorter {
    camera: Arc<dyn CameraModel>,
}

impl PassthroughUndistorter {
    /// Create a pass-through undistorter for a single camera.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera reports a zero-area resolution.
    pub fn new(camera: Arc<dyn CameraModel>) -> Result<Self, RectifyError> {
        let res = camera.resolution();
        if res.width == 0 || res.height == 0 {
            return Err(RectifyError::InvalidResolution(res.width, res.height));
        }
        Ok(Self { camera })
    }

    /// The camera shared by the input and output side.
    pub fn camera(&self) -> &Arc<dyn CameraModel> {
        &self.camera
    }
}

impl<const C: usize> Undistorter<C> for PassthroughUndistorter {
    fn process_image(
        &self,
        src: &Image<f32, C>,
        dst: &mut Image<f32, C>,
    ) -> Result<(), RectifyError> {
        check_image_size(src.size(), self.camera.resolution())?;
        check_image_size(dst.size(), self.camera.resolution())?;
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        Ok(())
    }

    fn input_camera(&self) -> &Arc<dyn CameraModel> {
        &self.camera
    }

    fn output_camera(&self) -> &Arc<dyn CameraModel> {
        &self.camera
    }
}

fn check_image_size(got: ImageSize, expected: ImageSize) -> Result<(), RectifyError> {
    if got != expected {
        return Err(RectifyError::InvalidImageSize(
            expected.width,
            expected.height,
            got.width,
            got.height,
        ));
    }
    Ok(())
}
