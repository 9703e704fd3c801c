use glam::DVec3;

/// What the drag math needs to know about the camera
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    /// Camera position in world space
    pub position: DVec3,
    /// Normalized view direction
    pub direction: DVec3,
}

impl CameraView {
    pub fn new(position: DVec3, direction: DVec3) -> Self {
        let direction = direction.normalize_or_zero();
        Self {
            position,
            direction: if direction == DVec3::ZERO {
                DVec3::NEG_Z
            } else {
                direction
            },
        }
    }

    /// Camera at `position` looking at `target`
    pub fn looking_at(position: DVec3, target: DVec3) -> Self {
        Self::new(position, target - position)
    }
}

impl Default for CameraView {
    fn default() -> Self {
        Self::looking_at(DVec3::new(5.0, 6.0, 8.0), DVec3::ZERO)
    }
}

/// Orbit camera for headless drivers that think in yaw/pitch/distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcBallCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f64,
    /// Vertical rotation angle (radians)
    pub pitch: f64,
    /// Distance from target
    pub distance: f64,
    /// Camera target point
    pub target: DVec3,
}

impl ArcBallCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.4,
            distance: 12.0,
            target: DVec3::ZERO,
        }
    }

    /// Orbit from angles in degrees. Pitch is clamped short of the poles and
    /// distance to a sane range.
    pub fn from_degrees(yaw: f64, pitch: f64, distance: f64, target: DVec3) -> Self {
        Self {
            yaw: yaw.to_radians(),
            pitch: pitch.to_radians().clamp(-1.5, 1.5),
            distance: distance.clamp(0.5, 500.0),
            target,
        }
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> DVec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + DVec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// Position + direction snapshot for the drag controller
    pub fn view(&self) -> CameraView {
        CameraView::looking_at(self.eye_position(), self.target)
    }
}

impl Default for ArcBallCamera {
    fn default() -> Self {
        Self::new()
    }
}
