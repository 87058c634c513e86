//! Conversion from the Hershey grid to drawing units.

use hersheykit_core::GridPoint;

use crate::error::{ExportError, ExportResult};

/// Scales grid coordinates and optionally flips the y axis.
///
/// Hershey data has y growing downward, so drawings are flipped by default
/// to read upright in CAD tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    /// Drawing units per grid unit.
    pub scale: f64,
    pub flip_y: bool,
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            flip_y: true,
        }
    }
}

impl CoordinateTransform {
    pub fn new(scale: f64, flip_y: bool) -> ExportResult<Self> {
        let transform = Self { scale, flip_y };
        transform.validate()?;
        Ok(transform)
    }

    pub fn validate(&self) -> ExportResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ExportError::InvalidOptions(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        Ok(())
    }

    pub fn apply(&self, point: GridPoint) -> (f64, f64) {
        let y = if self.flip_y { -point.y } else { point.y };
        (f64::from(point.x) * self.scale, f64::from(y) * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flips_y() {
        let t = CoordinateTransform::default();
        assert_eq!(t.apply(GridPoint::new(3, -9)), (3.0, 9.0));
    }

    #[test]
    fn test_scale_without_flip() {
        let t = CoordinateTransform::new(0.5, false).unwrap();
        assert_eq!(t.apply(GridPoint::new(4, -2)), (2.0, -1.0));
    }

    #[test]
    fn test_rejects_bad_scale() {
        assert!(CoordinateTransform::new(0.0, true).is_err());
        assert!(CoordinateTransform::new(-1.0, true).is_err());
        assert!(CoordinateTransform::new(f64::NAN, true).is_err());
    }
}
