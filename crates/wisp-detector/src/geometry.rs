//! Placement volumes for sector geometry.

use wisp_core::Vector3;

/// A closed placement volume within the detector coordinate system.
///
/// Used for fiducial-volume constraints on secondary vertex placement
/// and for spatial queries against sectors.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Sphere centered at `center` with radius `radius`.
    Sphere {
        /// Center coordinate.
        center: Vector3,
        /// Radius (meters).
        radius: f64,
    },
    /// Axis-aligned box.
    Box {
        /// Minimum corner (inclusive).
        min: Vector3,
        /// Maximum corner (inclusive).
        max: Vector3,
    },
    /// Cylinder with axis parallel to z.
    Cylinder {
        /// Center of the cylinder.
        center: Vector3,
        /// Radius in the x-y plane (meters).
        radius: f64,
        /// Full extent along z (meters).
        height: f64,
    },
}

impl Geometry {
    /// Whether `point` lies inside (or on the boundary of) this volume.
    pub fn contains(&self, point: &Vector3) -> bool {
        match self {
            Self::Sphere { center, radius } => {
                point.distance_squared(center) <= radius * radius
            }
            Self::Box { min, max } => (0..3).all(|i| {
                point.0[i] >= min.0[i] && point.0[i] <= max.0[i]
            }),
            Self::Cylinder {
                center,
                radius,
                height,
            } => {
                let dx = point.0[0] - center.0[0];
                let dy = point.0[1] - center.0[1];
                let dz = (point.0[2] - center.0[2]).abs();
                dx * dx + dy * dy <= radius * radius && dz <= height / 2.0
            }
        }
    }

    /// An axis-aligned bounding box `(min, max)` enclosing this volume.
    ///
    /// Used by placement sampling to draw candidate points.
    pub fn bounding_box(&self) -> (Vector3, Vector3) {
        match self {
            Self::Sphere { center, radius } => (
                Vector3::new(
                    center.0[0] - radius,
                    center.0[1] - radius,
                    center.0[2] - radius,
                ),
                Vector3::new(
                    center.0[0] + radius,
                    center.0[1] + radius,
                    center.0[2] + radius,
                ),
            ),
            Self::Box { min, max } => (*min, *max),
            Self::Cylinder {
                center,
                radius,
                height,
            } => (
                Vector3::new(
                    center.0[0] - radius,
                    center.0[1] - radius,
                    center.0[2] - height / 2.0,
                ),
                Vector3::new(
                    center.0[0] + radius,
                    center.0[1] + radius,
                    center.0[2] + height / 2.0,
                ),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_containment() {
        let g = Geometry::Sphere {
            center: Vector3::new(0.0, 0.0, 0.0),
            radius: 2.0,
        };
        assert!(g.contains(&Vector3::new(1.0, 1.0, 1.0)));
        assert!(g.contains(&Vector3::new(2.0, 0.0, 0.0)));
        assert!(!g.contains(&Vector3::new(2.0, 0.1, 0.0)));
    }

    #[test]
    fn box_containment_is_inclusive() {
        let g = Geometry::Box {
            min: Vector3::new(-1.0, -1.0, -1.0),
            max: Vector3::new(1.0, 1.0, 1.0),
        };
        assert!(g.contains(&Vector3::new(1.0, -1.0, 0.0)));
        assert!(!g.contains(&Vector3::new(1.0001, 0.0, 0.0)));
    }

    #[test]
    fn cylinder_containment() {
        let g = Geometry::Cylinder {
            center: Vector3::new(0.0, 0.0, 0.0),
            radius: 1.0,
            height: 4.0,
        };
        assert!(g.contains(&Vector3::new(0.5, 0.5, 1.9)));
        assert!(!g.contains(&Vector3::new(0.5, 0.5, 2.1)));
        assert!(!g.contains(&Vector3::new(0.9, 0.9, 0.0)));
    }

    #[test]
    fn bounding_box_encloses_volume() {
        let g = Geometry::Sphere {
            center: Vector3::new(1.0, 2.0, 3.0),
            radius: 0.5,
        };
        let (min, max) = g.bounding_box();
        assert_eq!(min, Vector3::new(0.5, 1.5, 2.5));
        assert_eq!(max, Vector3::new(1.5, 2.5, 3.5));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arbitrary_geometry() -> impl Strategy<Value = Geometry> {
            let coord = -100.0f64..100.0;
            let extent = 0.1f64..50.0;
            prop_oneof![
                ((coord.clone(), coord.clone(), coord.clone()), extent.clone()).prop_map(
                    |((x, y, z), r)| Geometry::Sphere {
                        center: Vector3::new(x, y, z),
                        radius: r,
                    }
                ),
                (
                    (coord.clone(), coord.clone(), coord.clone()),
                    (extent.clone(), extent.clone(), extent.clone()),
                )
                    .prop_map(|((x, y, z), (dx, dy, dz))| Geometry::Box {
                        min: Vector3::new(x, y, z),
                        max: Vector3::new(x + dx, y + dy, z + dz),
                    }),
                ((coord.clone(), coord.clone(), coord), (extent.clone(), extent)).prop_map(
                    |((x, y, z), (r, h))| Geometry::Cylinder {
                        center: Vector3::new(x, y, z),
                        radius: r,
                        height: h,
                    }
                ),
            ]
        }

        proptest! {
            #[test]
            fn contained_points_lie_within_the_bounding_box(
                geometry in arbitrary_geometry(),
                x in -200.0f64..200.0,
                y in -200.0f64..200.0,
                z in -200.0f64..200.0,
            ) {
                let point = Vector3::new(x, y, z);
                if geometry.contains(&point) {
                    let (min, max) = geometry.bounding_box();
                    for i in 0..3 {
                        prop_assert!(point.0[i] >= min.0[i] && point.0[i] <= max.0[i]);
                    }
                }
            }
        }
    }
}
