//! Viewport, projection and camera-view matrices
//!
//! All matrices are homogeneous 4x4 and act on column vectors. The view
//! volume uses the right-handed camera frame where the camera looks down -w,
//! so with the usual `near > far` both presets map nearer points to larger
//! normalized depth.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::linalg::{Matrix, Vec3};

/// Axis-aligned view volume in camera space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewVolume {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl ViewVolume {
    /// Symmetric cube of half-size `s` with near = s and far = -s
    pub fn cube(s: f64) -> Self {
        Self {
            left: -s,
            right: s,
            bottom: -s,
            top: s,
            near: s,
            far: -s,
        }
    }
}

/// Projection selector shared by both render pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

impl Projection {
    pub fn toggled(self) -> Self {
        match self {
            Projection::Perspective => Projection::Orthographic,
            Projection::Orthographic => Projection::Perspective,
        }
    }
}

/// Maps the canonical [-1, 1] square onto pixel centers of an nx × ny image
pub fn viewport(nx: usize, ny: usize) -> Matrix {
    let (nx, ny) = (nx as f64, ny as f64);
    let mut m = Matrix::identity(4);
    m[(0, 0)] = nx / 2.0;
    m[(0, 3)] = (nx - 1.0) / 2.0;
    m[(1, 1)] = ny / 2.0;
    m[(1, 3)] = (ny - 1.0) / 2.0;
    m
}

/// Maps the view volume box onto the canonical cube
pub fn orthographic(v: &ViewVolume) -> RenderResult<Matrix> {
    if v.right == v.left || v.top == v.bottom || v.near == v.far {
        return Err(RenderError::DegenerateGeometry("view volume has zero extent"));
    }
    let (l, r, b, t, n, f) = (v.left, v.right, v.bottom, v.top, v.near, v.far);
    Matrix::from_rows(&[
        [2.0 / (r - l), 0.0, 0.0, -(r + l) / (r - l)],
        [0.0, 2.0 / (t - b), 0.0, -(t + b) / (t - b)],
        [0.0, 0.0, 2.0 / (n - f), -(n + f) / (n - f)],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Orthographic · K, where K collapses the frustum onto the view box
pub fn perspective(v: &ViewVolume) -> RenderResult<Matrix> {
    let (n, f) = (v.near, v.far);
    let k = Matrix::from_rows(&[
        [n, 0.0, 0.0, 0.0],
        [0.0, n, 0.0, 0.0],
        [0.0, 0.0, n + f, -f * n],
        [0.0, 0.0, 1.0, 0.0],
    ])?;
    orthographic(v)?.checked_mul(&k)
}

pub fn projection(mode: Projection, v: &ViewVolume) -> RenderResult<Matrix> {
    match mode {
        Projection::Perspective => perspective(v),
        Projection::Orthographic => orthographic(v),
    }
}

/// Look-at transform: world points into the camera's (u, v, w) frame
///
/// Fails if `gaze` is zero or `top` is parallel to it.
pub fn camera_view(eye: Vec3, gaze: Vec3, top: Vec3) -> RenderResult<Matrix> {
    let w = -gaze.normalize()?;
    let u = top.cross(w).normalize()?;
    let v = w.cross(u);

    let rotation = Matrix::from_rows(&[
        [u.x(), u.y(), u.z(), 0.0],
        [v.x(), v.y(), v.z(), 0.0],
        [w.x(), w.y(), w.z(), 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])?;
    let translation = Matrix::from_rows(&[
        [1.0, 0.0, 0.0, -eye.x()],
        [0.0, 1.0, 0.0, -eye.y()],
        [0.0, 0.0, 1.0, -eye.z()],
        [0.0, 0.0, 0.0, 1.0],
    ])?;
    rotation.checked_mul(&translation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::Vec4;

    fn close(a: Vec4, b: Vec4) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn test_viewport_maps_origin_to_pixel_center() {
        let p = viewport(100, 100).apply(Vec4::new(0.0, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(p.x(), 49.5);
        assert_eq!(p.y(), 49.5);
    }

    #[test]
    fn test_viewport_corners() {
        let m = viewport(10, 4);
        let lo = m.apply(Vec4::new(-1.0, -1.0, 0.0, 1.0)).unwrap();
        let hi = m.apply(Vec4::new(1.0, 1.0, 0.0, 1.0)).unwrap();
        assert!(close(lo, Vec4::new(-0.5, -0.5, 0.0, 1.0)));
        assert!(close(hi, Vec4::new(9.5, 3.5, 0.0, 1.0)));
    }

    #[test]
    fn test_orthographic_maps_box_to_cube() {
        let v = ViewVolume {
            left: -2.0,
            right: 6.0,
            bottom: 0.0,
            top: 4.0,
            near: -1.0,
            far: -11.0,
        };
        let m = orthographic(&v).unwrap();
        let a = m.apply(Vec4::new(-2.0, 0.0, -1.0, 1.0)).unwrap();
        let b = m.apply(Vec4::new(6.0, 4.0, -11.0, 1.0)).unwrap();
        assert!(close(a, Vec4::new(-1.0, -1.0, 1.0, 1.0)));
        assert!(close(b, Vec4::new(1.0, 1.0, -1.0, 1.0)));
    }

    #[test]
    fn test_orthographic_rejects_flat_volume() {
        let mut v = ViewVolume::cube(1.0);
        v.right = v.left;
        assert!(orthographic(&v).is_err());
    }

    #[test]
    fn test_perspective_keeps_near_and_far_planes() {
        let v = ViewVolume {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near: -1.0,
            far: -10.0,
        };
        let m = perspective(&v).unwrap();
        let near = m.apply(Vec4::new(1.0, 1.0, -1.0, 1.0)).unwrap().perspective_divide().unwrap();
        let far = m.apply(Vec4::new(10.0, 10.0, -10.0, 1.0)).unwrap().perspective_divide().unwrap();
        assert!((near - Vec3::new(1.0, 1.0, 1.0)).norm() < 1e-9);
        assert!((far - Vec3::new(1.0, 1.0, -1.0)).norm() < 1e-9);
    }

    #[test]
    fn test_camera_view_maps_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let m = camera_view(eye, Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)).unwrap();
        let p = m.apply(eye.extend(1.0)).unwrap();
        assert!(close(p, Vec4::new(0.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_camera_view_basis_is_rigid() {
        let m = camera_view(
            Vec3::new(3.0, -2.0, 7.0),
            Vec3::new(-1.0, 0.5, -2.0),
            Vec3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        assert!((m.determinant().unwrap() - 1.0).abs() < 1e-9);
        // A point straight ahead of the eye lands on the -w axis
        let ahead = Vec3::new(3.0, -2.0, 7.0) + Vec3::new(-1.0, 0.5, -2.0).normalize().unwrap() * 4.0;
        let p = m.apply(ahead.extend(1.0)).unwrap();
        assert!(close(p, Vec4::new(0.0, 0.0, -4.0, 1.0)));
    }

    #[test]
    fn test_camera_view_parallel_top_is_degenerate() {
        let r = camera_view(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        assert!(matches!(r, Err(RenderError::DegenerateGeometry(_))));
    }
}
