use argus_image::ImageSize;
use glam::{DVec2, DVec3};

/// Geometric projection model of a camera.
///
/// The rectification pipeline consumes camera models as an opaque capability:
/// map a 3d ray in the camera frame to a sub-pixel image coordinate, and back.
/// Concrete models (distortion polynomials, fisheye models, ...) live outside
/// this crate; [`PinholeCamera`] is provided as a reference implementation.
///
/// Both operations report failure as `None`. Failure is expected data for rays
/// outside the valid field of view, points behind the camera, or regions where
/// a distortion inverse is numerically unstable. The pipeline never retries or
/// approximates a failed projection.
///
/// Models are required to be `Send + Sync` so a single instance can be shared
/// across frame-processing threads behind an `Arc`.
pub trait CameraModel: Send + Sync {
    /// The resolution of the images described by this camera.
    fn resolution(&self) -> ImageSize;

    /// Project a 3d ray in the camera frame to a sub-pixel image coordinate.
    fn project(&self, ray: DVec3) -> Option<DVec2>;

    /// Back-project a sub-pixel image coordinate to a 3d ray in the camera frame.
    fn unproject(&self, pixel: DVec2) -> Option<DVec3>;
}

/// An ideal distortion-free pinhole camera.
///
/// # Examples
///
/// ```
/// use argus_image::ImageSize;
/// use argus_rectify::{CameraModel, PinholeCamera};
/// use glam::DVec3;
///
/// let camera = PinholeCamera::new(
///     500.0,
///     500.0,
///     320.0,
///     240.0,
///     ImageSize {
///         width: 640,
///         height: 480,
///     },
/// );
///
/// let pixel = camera.project(DVec3::new(0.0, 0.0, 1.0)).unwrap();
/// assert_eq!(pixel.x, 320.0);
/// assert_eq!(pixel.y, 240.0);
/// ```
#[derive(Clone, Debug)]
pub struct PinholeCamera {
    /// The focal length in the x direction
    fx: f64,
    /// The focal length in the y direction
    fy: f64,
    /// The x coordinate of the principal point
    cx: f64,
    /// The y coordinate of the principal point
    cy: f64,
    /// The resolution of the images described by this camera
    resolution: ImageSize,
}

impl PinholeCamera {
    /// Create a new pinhole camera from its intrinsic parameters and resolution.
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64, resolution: ImageSize) -> Self {
        Self {
            fx,
            fy,
            cx,
            cy,
            resolution,
        }
    }

    /// The focal lengths (fx, fy) in pixels.
    pub fn focal_length(&self) -> (f64, f64) {
        (self.fx, self.fy)
    }

    /// The principal point (cx, cy) in pixels.
    pub fn principal_point(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }
}

impl CameraModel for PinholeCamera {
    fn resolution(&self) -> ImageSize {
        self.resolution
    }

    fn project(&self, ray: DVec3) -> Option<DVec2> {
        // points on or behind the image plane have no projection
        if ray.z <= 0.0 {
            return None;
        }
        Some(DVec2::new(
            self.fx * ray.x / ray.z + self.cx,
            self.fy * ray.y / ray.z + self.cy,
        ))
    }

    fn unproject(&self, pixel: DVec2) -> Option<DVec3> {
        let x = (pixel.x - self.cx) / self.fx;
        let y = (pixel.y - self.cy) / self.fy;
        Some(DVec3::new(x, y, 1.0).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> PinholeCamera {
        PinholeCamera::new(
            500.0,
            500.0,
            319.5,
            239.5,
            ImageSize {
                width: 640,
                height: 480,
            },
        )
    }

    #[test]
    fn pinhole_project_unproject_roundtrip() {
        let camera = camera();
        let pixel = DVec2::new(100.25, 410.75);

        let ray = camera.unproject(pixel).unwrap();
        let reprojected = camera.project(ray).unwrap();

        assert_relative_eq!(reprojected.x, pixel.x, epsilon = 1e-9);
        assert_relative_eq!(reprojected.y, pixel.y, epsilon = 1e-9);
    }

    #[test]
    fn pinhole_project_behind_camera_fails() {
        let camera = camera();
        assert!(camera.project(DVec3::new(0.1, 0.2, -1.0)).is_none());
        assert!(camera.project(DVec3::new(0.1, 0.2, 0.0)).is_none());
    }

    #[test]
    fn pinhole_unproject_unit_norm() {
        let camera = camera();
        let ray = camera.unproject(DVec2::new(0.0, 0.0)).unwrap();
        assert_relative_eq!(ray.length(), 1.0, epsilon = 1e-12);
    }
}
