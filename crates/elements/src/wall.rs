//! Straight walls of constant thickness and height.

use elements_kernel_geom::{Curve3d, CurveError, Line, Polygon};
use elements_kernel_math::{Point3, Tolerance, Transform, Vec3};
use elements_kernel_solids::{Extrude, Representation, Solid};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ElementError, Material, Opening};

/// A wall extruded upward from a horizontal center line.
///
/// The representation is derived from the center line, thickness and
/// height and is rebuilt whenever one of them changes. Openings are kept
/// alongside; cutting them out is left to a boolean stage (see
/// [`StandardWall::voids`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WallRecord", try_from = "WallRecord")]
pub struct StandardWall {
    center_line: Line,
    thickness: f64,
    height: f64,
    openings: Vec<Opening>,
    material: Material,
    name: Option<String>,
    representation: Representation,
}

impl StandardWall {
    /// Create a wall and build its representation.
    ///
    /// Fails when the height or thickness is not strictly positive, or when
    /// the center line's endpoints differ in Z.
    pub fn new(center_line: Line, thickness: f64, height: f64) -> Result<Self, ElementError> {
        validate_height(height)?;
        validate_thickness(thickness)?;
        let (start_z, end_z) = (center_line.start().z, center_line.end().z);
        if !Tolerance::DEFAULT.is_zero(start_z - end_z) {
            return Err(ElementError::NonPlanarCenterLine { start_z, end_z });
        }
        let solid = wall_solid(&center_line, thickness, height)?;
        let representation = Representation::from_solid(solid);
        Ok(Self {
            center_line,
            thickness,
            height,
            openings: Vec::new(),
            material: Material::concrete(),
            name: None,
            representation,
        })
    }

    /// Set the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Center line.
    pub fn center_line(&self) -> &Line {
        &self.center_line
    }

    /// Thickness.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Openings in insertion order.
    pub fn openings(&self) -> &[Opening] {
        &self.openings
    }

    /// Material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Current representation: the wall solid.
    pub fn representation(&self) -> &Representation {
        &self.representation
    }

    /// Change the thickness and rebuild.
    pub fn set_thickness(&mut self, thickness: f64) -> Result<(), ElementError> {
        validate_thickness(thickness)?;
        self.thickness = thickness;
        self.update_representations()
    }

    /// Change the height and rebuild.
    pub fn set_height(&mut self, height: f64) -> Result<(), ElementError> {
        validate_height(height)?;
        self.height = height;
        self.update_representations()
    }

    /// Add a rectangular opening centered `x` along the center line and
    /// `y` above it.
    pub fn add_opening(
        &mut self,
        width: f64,
        height: f64,
        x: f64,
        y: f64,
        depth_front: f64,
        depth_back: f64,
    ) -> Result<&mut Opening, ElementError> {
        let perimeter = Polygon::rectangle(width, height)?;
        self.add_opening_with_perimeter(perimeter, x, y, depth_front, depth_back)
    }

    /// Add an opening with an arbitrary perimeter whose local origin sits
    /// `x` along the center line and `y` above it.
    pub fn add_opening_with_perimeter(
        &mut self,
        perimeter: Polygon,
        x: f64,
        y: f64,
        depth_front: f64,
        depth_back: f64,
    ) -> Result<&mut Opening, ElementError> {
        let transform = self.opening_transform(x, y)?;
        let opening = Opening::new(perimeter, depth_front, depth_back, transform)?;
        self.openings.push(opening);
        let last = self.openings.len() - 1;
        Ok(&mut self.openings[last])
    }

    /// Frame of an opening: X along the wall, Z through the wall toward
    /// the `direction × Z` face, Y up.
    fn opening_transform(&self, x: f64, y: f64) -> Result<Transform, ElementError> {
        let x_axis = self.center_line.direction().into_inner();
        let wall_frame = Transform::from_x_and_z(self.center_line.start(), x_axis, Vec3::z())?;
        let origin = wall_frame.apply_point(&Point3::new(x, 0.0, y));
        Ok(Transform::from_x_and_z(
            origin,
            x_axis,
            x_axis.cross(&Vec3::z()),
        )?)
    }

    /// Replace the representation with one rebuilt from the current
    /// center line, thickness and height.
    pub fn update_representations(&mut self) -> Result<(), ElementError> {
        let solid = wall_solid(&self.center_line, self.thickness, self.height)?;
        self.representation.clear();
        self.representation.push(solid);
        debug!(
            thickness = self.thickness,
            height = self.height,
            openings = self.openings.len(),
            "rebuilt wall representation"
        );
        Ok(())
    }

    /// One void solid per opening, for an external boolean stage.
    pub fn voids(&self) -> Result<Vec<Solid>, ElementError> {
        self.openings
            .iter()
            .map(|o| {
                let void = o.void_operation()?;
                Ok::<_, ElementError>(Solid::from_operation(void))
            })
            .collect()
    }
}

fn validate_height(height: f64) -> Result<(), ElementError> {
    if !(height > 0.0) {
        return Err(ElementError::InvalidHeight(height));
    }
    Ok(())
}

fn validate_thickness(thickness: f64) -> Result<(), ElementError> {
    if !(thickness > 0.0) {
        return Err(ElementError::InvalidThickness(thickness));
    }
    Ok(())
}

/// Footprint of a wall: the center line offset half the thickness to
/// each side.
pub fn wall_profile(center_line: &Line, thickness: f64) -> Result<Polygon, CurveError> {
    let e1 = center_line.offset(thickness / 2.0, false)?;
    let e2 = center_line.offset(thickness / 2.0, true)?;
    Polygon::new(vec![e1.start(), e1.end(), e2.end(), e2.start()])
}

/// The wall solid: its footprint extruded `height` straight up.
pub fn wall_solid(center_line: &Line, thickness: f64, height: f64) -> Result<Solid, ElementError> {
    let profile = wall_profile(center_line, thickness)?;
    let extrude = Extrude::new(profile, height, Vec3::z(), false)?;
    Ok(Solid::from_operation(extrude))
}

/// Persisted form. The representation is written out but rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WallRecord {
    center_line: Line,
    thickness: f64,
    height: f64,
    #[serde(default)]
    openings: Vec<Opening>,
    #[serde(default)]
    material: Material,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_deserializing)]
    representation: Representation,
}

impl From<StandardWall> for WallRecord {
    fn from(w: StandardWall) -> Self {
        Self {
            center_line: w.center_line,
            thickness: w.thickness,
            height: w.height,
            openings: w.openings,
            material: w.material,
            name: w.name,
            representation: w.representation,
        }
    }
}

impl TryFrom<WallRecord> for StandardWall {
    type Error = ElementError;

    fn try_from(r: WallRecord) -> Result<Self, Self::Error> {
        let mut wall =
            StandardWall::new(r.center_line, r.thickness, r.height)?.with_material(r.material);
        wall.name = r.name;
        wall.openings = r.openings;
        Ok(wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use elements_kernel_math::ApproxEq;

    fn x_wall() -> StandardWall {
        let line = Line::new(Point3::origin(), Point3::new(10.0, 0.0, 0.0)).unwrap();
        StandardWall::new(line, 0.1, 5.0).unwrap()
    }

    #[test]
    fn test_wall_validation() {
        let line = Line::new(Point3::origin(), Point3::new(10.0, 0.0, 0.0)).unwrap();
        assert_eq!(
            StandardWall::new(line.clone(), 0.1, 0.0),
            Err(ElementError::InvalidHeight(0.0))
        );
        assert_eq!(
            StandardWall::new(line.clone(), -0.1, 3.0),
            Err(ElementError::InvalidThickness(-0.1))
        );
        assert!(StandardWall::new(line, 0.1, f64::NAN).is_err());

        let sloped = Line::new(Point3::origin(), Point3::new(10.0, 0.0, 1.0)).unwrap();
        assert_eq!(
            StandardWall::new(sloped, 0.1, 3.0),
            Err(ElementError::NonPlanarCenterLine {
                start_z: 0.0,
                end_z: 1.0
            })
        );
    }

    #[test]
    fn test_wall_solid_dimensions() {
        let wall = x_wall();
        assert_eq!(wall.representation().geometries().len(), 1);
        assert_eq!(wall.representation().geometries()[0].operations().len(), 1);
        let mesh = wall.representation().mesh();
        assert_eq!(mesh.num_triangles(), 12);
        let bounds = mesh.bounds();
        assert!(bounds.min.is_almost_equal_to(&Point3::new(0.0, -0.05, 0.0)));
        assert!(bounds.max.is_almost_equal_to(&Point3::new(10.0, 0.05, 5.0)));
    }

    #[test]
    fn test_profile_winding() {
        let line = Line::new(Point3::origin(), Point3::new(10.0, 0.0, 0.0)).unwrap();
        let profile = wall_profile(&line, 0.2).unwrap();
        assert!(profile.normal().is_almost_equal_to(&Vec3::z_axis()));
        assert_relative_eq!(profile.area(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut wall = x_wall();
        let before = wall.representation().clone();
        wall.update_representations().unwrap();
        let once = wall.representation().clone();
        wall.update_representations().unwrap();
        assert_eq!(wall.representation(), &once);
        assert_eq!(once, before);
        assert_eq!(wall.representation().mesh(), before.mesh());
    }

    #[test]
    fn test_setters_rebuild() {
        let mut wall = x_wall();
        wall.set_height(2.0).unwrap();
        assert_relative_eq!(wall.representation().mesh().bounds().max.z, 2.0, epsilon = 1e-12);
        wall.set_thickness(0.4).unwrap();
        assert_relative_eq!(wall.representation().mesh().bounds().max.y, 0.2, epsilon = 1e-12);
        assert_eq!(wall.set_height(-1.0), Err(ElementError::InvalidHeight(-1.0)));
        assert_relative_eq!(wall.height(), 2.0);
    }

    #[test]
    fn test_opening_transform() {
        let mut wall = x_wall();
        let opening = wall.add_opening(1.0, 1.0, 5.0, 1.0, 1.0, 1.0).unwrap();
        let t = opening.transform();
        assert!(t.origin().is_almost_equal_to(&Point3::new(5.0, 0.0, 1.0)));
        assert!(t.x_axis().is_almost_equal_to(&Vec3::x_axis()));
        assert!(t.y_axis().is_almost_equal_to(&Vec3::z_axis()));
        assert!(t.z_axis().as_ref().is_almost_equal_to(&Vec3::new(0.0, -1.0, 0.0)));
        assert_eq!(wall.openings().len(), 1);
    }

    #[test]
    fn test_opening_on_offset_wall() {
        let line = Line::new(Point3::new(2.0, 3.0, 1.0), Point3::new(2.0, 13.0, 1.0)).unwrap();
        let mut wall = StandardWall::new(line, 0.2, 3.0).unwrap();
        let opening = wall.add_opening(1.0, 1.0, 4.0, 1.5, 0.5, 0.5).unwrap();
        // Origin is a point on the wall, not a displacement from the world origin.
        assert!(opening
            .transform()
            .origin()
            .is_almost_equal_to(&Point3::new(2.0, 7.0, 2.5)));
    }

    #[test]
    fn test_opening_with_perimeter_and_voids() {
        let mut wall = x_wall();
        let triangle = Polygon::new(vec![
            Point3::new(-0.5, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .unwrap();
        wall.add_opening_with_perimeter(triangle, 3.0, 1.0, 1.0, 1.0)
            .unwrap();
        wall.add_opening(1.0, 2.0, 7.0, 1.0, 1.0, 1.0).unwrap();
        let voids = wall.voids().unwrap();
        assert_eq!(voids.len(), 2);
        let bounds = voids[0].mesh().bounds();
        assert_relative_eq!(bounds.min.y, -1.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.max.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.max.z, 2.0, epsilon = 1e-12);
        // Openings never change the wall's own solid.
        assert_eq!(wall.representation().mesh().num_triangles(), 12);
    }

    #[test]
    fn test_invalid_opening() {
        let mut wall = x_wall();
        assert!(wall.add_opening(0.0, 1.0, 1.0, 1.0, 1.0, 1.0).is_err());
        assert!(wall.add_opening(1.0, 1.0, 1.0, 1.0, -1.0, 1.0).is_err());
        assert!(wall.openings().is_empty());
    }

    #[test]
    fn test_wall_serde() {
        let mut wall = x_wall().with_name("North").with_material(Material::concrete());
        wall.add_opening(1.0, 1.0, 5.0, 1.0, 1.0, 1.0).unwrap();
        let json = serde_json::to_value(&wall).unwrap();
        assert_eq!(json["Thickness"], 0.1);
        assert_eq!(json["Height"], 5.0);
        assert_eq!(json["CenterLine"]["End"][0], 10.0);
        assert_eq!(json["Openings"].as_array().unwrap().len(), 1);
        assert_eq!(json["Name"], "North");
        let geometries = json["Representation"]["Geometries"].as_array().unwrap();
        assert_eq!(geometries.len(), 1);
        assert_eq!(geometries[0]["SolidOperations"][0]["Type"], "Extrude");
        let back: StandardWall = serde_json::from_value(json).unwrap();
        assert_eq!(back, wall);
    }
}
