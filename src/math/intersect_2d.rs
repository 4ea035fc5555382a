use super::{Point2D, Tolerance};

/// Which coefficient of a normalized implicit line was rescaled to exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivot {
    /// `a = 1`; the line is not (nearly) horizontal.
    A,
    /// `b = 1`; `a` was negligible.
    B,
}

/// Normalized implicit line `a * x + b * y + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImplicitLine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pivot: Pivot,
}

impl ImplicitLine {
    /// Line through `p` and `q`, normalized on whichever of `a`, `b` is not negligible.
    ///
    /// Returns `None` when both are negligible (coincident points).
    #[must_use]
    pub fn through(p: &Point2D, q: &Point2D, tol: Tolerance) -> Option<Self> {
        let a = p.y - q.y;
        let b = q.x - p.x;
        let c = p.x * q.y - q.x * p.y;
        if !tol.is_negligible(a) {
            Some(Self {
                a: 1.0,
                b: b / a,
                c: c / a,
                pivot: Pivot::A,
            })
        } else if !tol.is_negligible(b) {
            Some(Self {
                a: a / b,
                b: 1.0,
                c: c / b,
                pivot: Pivot::B,
            })
        } else {
            None
        }
    }

    #[must_use]
    pub fn pivot(&self) -> Pivot {
        self.pivot
    }

    /// Signed residual of `p` in the line equation.
    #[must_use]
    pub fn residual(&self, p: &Point2D) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }
}

/// Intersection point of two implicit lines.
///
/// Returns `None` if the lines are parallel or coincident (determinant below
/// tolerance). The solve substitutes through the pivot coefficient of `l1`.
#[must_use]
pub fn implicit_line_intersect(
    l1: &ImplicitLine,
    l2: &ImplicitLine,
    tol: Tolerance,
) -> Option<Point2D> {
    if tol.is_negligible(l1.a * l2.b - l2.a * l1.b) {
        return None;
    }
    let point = match l1.pivot {
        Pivot::A => {
            let y = (l2.a * l1.c - l2.c) / (l2.b - l2.a * l1.b);
            Point2D::new(-l1.b * y - l1.c, y)
        }
        Pivot::B => {
            let x = (l2.b * l1.c - l2.c) / (l2.a - l1.a * l2.b);
            Point2D::new(x, -l1.a * x - l1.c)
        }
    };
    Some(point)
}
