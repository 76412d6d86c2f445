//! Projection parameters and screen-space picking

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use vantage_core::{Ray, Transform};

/// Perspective lens attached to the rig's camera slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lens {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Lens {
    /// Get a projection matrix
    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect_ratio, self.near, self.far)
    }

    /// Get the view matrix for a camera placed at `camera`
    pub fn view(camera: &Transform) -> Mat4 {
        Mat4::from_rotation_translation(camera.rotation, camera.position).inverse()
    }

    /// Ray from the camera through a pixel.
    ///
    /// `cursor` is in pixels with the origin at the top-left corner. An empty
    /// viewport yields the center ray.
    pub fn screen_point_to_ray(&self, cursor: Vec2, viewport: Vec2, camera: &Transform) -> Ray {
        let (ndc, aspect) = if viewport.x > 0.0 && viewport.y > 0.0 {
            (
                Vec2::new(
                    2.0 * cursor.x / viewport.x - 1.0,
                    1.0 - 2.0 * cursor.y / viewport.y,
                ),
                viewport.x / viewport.y,
            )
        } else {
            (Vec2::ZERO, 1.0)
        };

        let half_height = (self.fov_degrees.to_radians() * 0.5).tan();
        let local = Vec3::new(ndc.x * half_height * aspect, ndc.y * half_height, -1.0);
        let direction = camera.rotation * local;
        Ray::new(camera.position + direction * self.near, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_center_ray_is_forward() {
        let lens = Lens::default();
        let camera = Transform::from_position_rotation(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        let ray = lens.screen_point_to_ray(Vec2::new(640.0, 360.0), Vec2::new(1280.0, 720.0), &camera);
        assert!((ray.direction - camera.forward()).length() < 1e-4);
    }

    #[test]
    fn test_empty_viewport_gives_center_ray() {
        let lens = Lens::default();
        let camera = Transform::default();
        let ray = lens.screen_point_to_ray(Vec2::new(10.0, 10.0), Vec2::ZERO, &camera);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_top_left_pixel_points_up_left() {
        let lens = Lens::default();
        let ray = lens.screen_point_to_ray(Vec2::ZERO, Vec2::new(800.0, 600.0), &Transform::default());
        assert!(ray.direction.x < 0.0);
        assert!(ray.direction.y > 0.0);
        assert!(ray.direction.z < 0.0);
    }

    #[test]
    fn test_ray_reprojects_to_cursor() {
        let lens = Lens::default();
        let viewport = Vec2::new(1280.0, 720.0);
        let cursor = Vec2::new(1000.0, 200.0);
        let camera = Transform::from_position_rotation(
            Vec3::new(0.0, 1.0, 0.0),
            Quat::from_rotation_y(0.3) * Quat::from_rotation_x(-0.2),
        );
        let ray = lens.screen_point_to_ray(cursor, viewport, &camera);

        let clip = lens.projection(viewport.x / viewport.y)
            * Lens::view(&camera)
            * ray.at(10.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        let pixel = Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        );
        assert!((pixel - cursor).length() < 0.5);
    }
}
