use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};

/// Euler order used by the host avatar system: Z first, then X, then Y
/// (`q = Ry * Rx * Rz`).
pub const HOST_EULER_ORDER: EulerRot = EulerRot::YXZ;

/// Euler angles in degrees, laid out as the host's rotation-offset vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct EulerAngles {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl EulerAngles {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Convert to quaternion (host order)
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            HOST_EULER_ORDER,
            self.y.to_radians(),
            self.x.to_radians(),
            self.z.to_radians(),
        )
    }

    /// Convert from quaternion (host order)
    pub fn from_quat(q: Quat) -> Self {
        let (y, x, z) = q.to_euler(HOST_EULER_ORDER);
        Self {
            x: x.to_degrees(),
            y: y.to_degrees(),
            z: z.to_degrees(),
        }
    }

    /// Wrap every axis into (-180, 180].
    pub fn normalized(self) -> Self {
        Self {
            x: delta_angle(self.x),
            y: delta_angle(self.y),
            z: delta_angle(self.z),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Shortest signed angle from 0 to `degrees`, in (-180, 180].
pub fn delta_angle(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Rotation that, applied after `source`, reproduces `target`:
/// `source * offset == target`.
pub fn rotation_offset(source: Quat, target: Quat) -> EulerAngles {
    let delta = source.inverse() * target;
    EulerAngles::from_quat(delta.normalize()).normalized()
}
