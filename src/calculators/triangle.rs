//! Triangle solver for SSS, SAS, ASA and base/height inputs.
//!
//! Side `a` is opposite angle `A`, `b` opposite `B`, `c` opposite `C`.
//! Angles are in degrees.

use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::parse::finite_number;
use crate::utils::validation::{validate_positive, validate_required, Validate};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

const SIDE_TOLERANCE: f64 = 1e-9;
/// Wide enough for sides rounded to four decimals (1, 1, 1.4142).
const ANGLE_TOLERANCE_DEG: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TriangleMode {
    /// Three sides: --a --b --c
    Sss,
    /// Two sides and the included angle: --a --b --angle-c
    Sas,
    /// Two angles and the included side: --angle-a --c --angle-b
    Asa,
    /// Base and perpendicular height: --base --height
    BaseHeight,
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct TriangleInput {
    #[arg(long, value_enum)]
    pub mode: TriangleMode,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub a: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub b: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub c: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub angle_a: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub angle_b: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub angle_c: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub base: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SideClass {
    Equilateral,
    Isosceles,
    Scalene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AngleClass {
    Acute,
    Right,
    Obtuse,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolvedTriangle {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub angle_a: f64,
    pub angle_b: f64,
    pub angle_c: f64,
    pub area: f64,
    pub perimeter: f64,
    pub height_a: f64,
    pub height_b: f64,
    pub height_c: f64,
    pub inradius: f64,
    pub circumradius: f64,
    pub side_class: SideClass,
    pub angle_class: AngleClass,
    pub classification: String,
}

/// Result for base/height input, where only the area is determined.
#[derive(Debug, Clone, Serialize)]
pub struct BaseHeightArea {
    pub base: f64,
    pub height: f64,
    pub area: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TriangleResult {
    Solved(SolvedTriangle),
    Area(BaseHeightArea),
}

fn invalid(message: impl Into<String>) -> CalcError {
    CalcError::InvalidTriangle {
        message: message.into(),
    }
}

fn side(field: &str, value: &Option<f64>) -> Result<f64> {
    let value = *validate_required(field, value)?;
    validate_positive(field, value)?;
    Ok(value)
}

fn angle(field: &str, value: &Option<f64>) -> Result<f64> {
    let value = *validate_required(field, value)?;
    if !(value > 0.0 && value < 180.0) {
        return Err(invalid(format!("{} must be between 0° and 180°", field)));
    }
    Ok(value)
}

/// Angle opposite `opposite` by the law of cosines, in degrees.
fn law_of_cosines_angle(opposite: f64, s1: f64, s2: f64) -> f64 {
    let cos = (s1 * s1 + s2 * s2 - opposite * opposite) / (2.0 * s1 * s2);
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

fn nearly_equal(x: f64, y: f64) -> bool {
    (x - y).abs() <= SIDE_TOLERANCE * x.abs().max(y.abs()).max(1.0)
}

/// Solve all angles from three sides and derive the rest.
pub fn solve_sss(a: f64, b: f64, c: f64) -> Result<SolvedTriangle> {
    if a + b <= c || a + c <= b || b + c <= a {
        return Err(invalid(format!(
            "sides {}, {}, {} violate the triangle inequality",
            a, b, c
        )));
    }

    let angle_a = law_of_cosines_angle(a, b, c);
    let angle_b = law_of_cosines_angle(b, a, c);
    let angle_c = 180.0 - angle_a - angle_b;

    let perimeter = a + b + c;
    let s = perimeter / 2.0;
    // Heron's formula
    let area = (s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt();

    let side_class = if nearly_equal(a, b) && nearly_equal(b, c) {
        SideClass::Equilateral
    } else if nearly_equal(a, b) || nearly_equal(b, c) || nearly_equal(a, c) {
        SideClass::Isosceles
    } else {
        SideClass::Scalene
    };

    let largest = angle_a.max(angle_b).max(angle_c);
    let angle_class = if (largest - 90.0).abs() <= ANGLE_TOLERANCE_DEG {
        AngleClass::Right
    } else if largest > 90.0 {
        AngleClass::Obtuse
    } else {
        AngleClass::Acute
    };

    Ok(SolvedTriangle {
        a,
        b,
        c,
        angle_a,
        angle_b,
        angle_c,
        area,
        perimeter,
        height_a: 2.0 * area / a,
        height_b: 2.0 * area / b,
        height_c: 2.0 * area / c,
        inradius: area / s,
        circumradius: a * b * c / (4.0 * area),
        side_class,
        angle_class,
        classification: format!("{:?} {:?}", side_class, angle_class),
    })
}

/// Two sides and the included angle C.
pub fn solve_sas(a: f64, b: f64, angle_c: f64) -> Result<SolvedTriangle> {
    let c = (a * a + b * b - 2.0 * a * b * angle_c.to_radians().cos()).sqrt();
    solve_sss(a, b, c)
}

/// Angles A and B with the included side c.
pub fn solve_asa(angle_a: f64, c: f64, angle_b: f64) -> Result<SolvedTriangle> {
    let angle_c = 180.0 - angle_a - angle_b;
    if angle_c <= 0.0 {
        return Err(invalid(format!(
            "angles {}° and {}° leave no room for a third angle",
            angle_a, angle_b
        )));
    }
    // law of sines: a / sin A = c / sin C
    let ratio = c / angle_c.to_radians().sin();
    let a = ratio * angle_a.to_radians().sin();
    let b = ratio * angle_b.to_radians().sin();
    solve_sss(a, b, c)
}

impl Validate for TriangleInput {
    fn validate(&self) -> Result<()> {
        match self.mode {
            TriangleMode::Sss => {
                side("a", &self.a)?;
                side("b", &self.b)?;
                side("c", &self.c)?;
            }
            TriangleMode::Sas => {
                side("a", &self.a)?;
                side("b", &self.b)?;
                angle("angle_c", &self.angle_c)?;
            }
            TriangleMode::Asa => {
                let angle_a = angle("angle_a", &self.angle_a)?;
                let angle_b = angle("angle_b", &self.angle_b)?;
                side("c", &self.c)?;
                if angle_a + angle_b >= 180.0 {
                    return Err(invalid("angle sum must be below 180°"));
                }
            }
            TriangleMode::BaseHeight => {
                side("base", &self.base)?;
                side("height", &self.height)?;
            }
        }
        Ok(())
    }
}

impl Calculator for TriangleInput {
    type Output = TriangleResult;
    const NAME: &'static str = "triangle";

    fn compute(&self) -> Result<TriangleResult> {
        let solved = match self.mode {
            TriangleMode::Sss => solve_sss(
                side("a", &self.a)?,
                side("b", &self.b)?,
                side("c", &self.c)?,
            )?,
            TriangleMode::Sas => solve_sas(
                side("a", &self.a)?,
                side("b", &self.b)?,
                angle("angle_c", &self.angle_c)?,
            )?,
            TriangleMode::Asa => solve_asa(
                angle("angle_a", &self.angle_a)?,
                side("c", &self.c)?,
                angle("angle_b", &self.angle_b)?,
            )?,
            TriangleMode::BaseHeight => {
                let base = side("base", &self.base)?;
                let height = side("height", &self.height)?;
                return Ok(TriangleResult::Area(BaseHeightArea {
                    base,
                    height,
                    area: 0.5 * base * height,
                }));
            }
        };
        Ok(TriangleResult::Solved(solved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(x: f64, y: f64, tol: f64) -> bool {
        (x - y).abs() < tol
    }

    #[test]
    fn test_sss_right_triangle() {
        let t = solve_sss(3.0, 4.0, 5.0).unwrap();
        assert!(close(t.angle_a, 36.8699, 1e-4));
        assert!(close(t.angle_b, 53.1301, 1e-4));
        assert!(close(t.angle_c, 90.0, 1e-9));
        assert!(close(t.area, 6.0, 1e-9));
        assert_eq!(t.perimeter, 12.0);
        assert_eq!(t.classification, "Scalene Right");
        assert!(close(t.inradius, 1.0, 1e-9));
        assert!(close(t.circumradius, 2.5, 1e-9));
    }

    #[test]
    fn test_rounded_sides_still_classify_right() {
        let t = solve_sss(1.0, 1.0, 1.4142).unwrap();
        assert_eq!(t.angle_class, AngleClass::Right);
        assert_eq!(t.classification, "Isosceles Right");

        let t = solve_sss(1.0, 1.0, 1.41).unwrap();
        assert_eq!(t.angle_class, AngleClass::Acute);
    }

    #[test]
    fn test_equilateral() {
        let t = solve_sss(2.0, 2.0, 2.0).unwrap();
        assert_eq!(t.side_class, SideClass::Equilateral);
        assert_eq!(t.angle_class, AngleClass::Acute);
        assert!(close(t.angle_a, 60.0, 1e-9));
    }

    #[test]
    fn test_sas_matches_sss() {
        let t = solve_sas(3.0, 4.0, 90.0).unwrap();
        assert!(close(t.c, 5.0, 1e-9));
        assert_eq!(t.classification, "Scalene Right");
    }

    #[test]
    fn test_asa_isosceles_obtuse() {
        let t = solve_asa(30.0, 1.0, 30.0).unwrap();
        assert!(close(t.angle_c, 120.0, 1e-9));
        assert!(close(t.a, t.b, 1e-12));
        assert_eq!(t.classification, "Isosceles Obtuse");
    }

    #[test]
    fn test_triangle_inequality() {
        let input = TriangleInput {
            mode: TriangleMode::Sss,
            a: Some(1.0),
            b: Some(2.0),
            c: Some(3.0),
            angle_a: None,
            angle_b: None,
            angle_c: None,
            base: None,
            height: None,
        };
        assert!(matches!(
            input.calculate(),
            Err(CalcError::InvalidTriangle { .. })
        ));
    }

    #[test]
    fn test_angle_sum_too_large() {
        let input = TriangleInput {
            mode: TriangleMode::Asa,
            a: None,
            b: None,
            c: Some(2.0),
            angle_a: Some(100.0),
            angle_b: Some(80.0),
            angle_c: None,
            base: None,
            height: None,
        };
        assert!(matches!(
            input.calculate(),
            Err(CalcError::InvalidTriangle { .. })
        ));
    }

    #[test]
    fn test_base_height_area() {
        let input = TriangleInput {
            mode: TriangleMode::BaseHeight,
            a: None,
            b: None,
            c: None,
            angle_a: None,
            angle_b: None,
            angle_c: None,
            base: Some(10.0),
            height: Some(4.0),
        };
        match input.calculate().unwrap() {
            TriangleResult::Area(area) => assert_eq!(area.area, 20.0),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
