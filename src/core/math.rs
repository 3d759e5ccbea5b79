// Math utilities and helper functions

use glam::Vec2;

/// Check whether a surface normal counts as walkable ground
///
/// `threshold` is the cosine of the steepest walkable slope: with 0.7 a
/// normal must lean less than ~45° from straight up. The comparison is
/// strict, so a normal sitting exactly on the threshold is a wall.
pub fn is_walkable(normal: Vec2, threshold: f32) -> bool {
    normal.y > threshold
}

/// Slope of the surface described by `normal`, in degrees from horizontal
pub fn slope_degrees(normal: Vec2) -> f32 {
    let normal = normal.normalize_or_zero();
    if normal == Vec2::ZERO {
        return 90.0;
    }
    normal.y.clamp(-1.0, 1.0).acos().to_degrees()
}
