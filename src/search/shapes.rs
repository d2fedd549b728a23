//! Shape catalogue. Which shape an item wears is cosmetic to the scheduler;
//! only the target/distractor split matters there.

use rand::Rng;

pub type ShapeId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    /// Regular polygon with `edges` corners, circumradius in cm.
    Polygon { edges: u8, radius: f64 },
    Circle { radius: f64 },
    Rect { width: f64, height: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub rgb: [u8; 3],
}

#[derive(Clone, Debug)]
pub struct ShapeCatalogue {
    shapes: Vec<ShapeSpec>,
}

impl ShapeCatalogue {
    pub fn new(shapes: Vec<ShapeSpec>) -> Self {
        Self { shapes }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            ShapeSpec {
                kind: ShapeKind::Polygon {
                    edges: 3,
                    radius: 3.0,
                },
                rgb: [0, 128, 0],
            },
            ShapeSpec {
                kind: ShapeKind::Polygon {
                    edges: 5,
                    radius: 3.0,
                },
                rgb: [255, 255, 255],
            },
            ShapeSpec {
                kind: ShapeKind::Circle { radius: 2.5 },
                rgb: [255, 0, 0],
            },
            ShapeSpec {
                kind: ShapeKind::Rect {
                    width: 3.0,
                    height: 6.0,
                },
                rgb: [0, 0, 255],
            },
            ShapeSpec {
                kind: ShapeKind::Rect {
                    width: 4.0,
                    height: 4.0,
                },
                rgb: [255, 255, 0],
            },
        ])
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> Option<&ShapeSpec> {
        self.shapes.get(id)
    }
}

/// Target shape fixed for a session plus the pool the distractors draw from.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeAssignment {
    pub target: ShapeId,
    distractors: Vec<ShapeId>,
}

impl ShapeAssignment {
    pub fn draw<R: Rng + ?Sized>(n_shapes: usize, rng: &mut R) -> Self {
        let target = if n_shapes > 0 {
            rng.random_range(0..n_shapes)
        } else {
            0
        };
        Self::with_target(n_shapes, target)
    }

    pub fn with_target(n_shapes: usize, target: ShapeId) -> Self {
        let distractors = (0..n_shapes).filter(|&s| s != target).collect();
        Self {
            target,
            distractors,
        }
    }

    pub fn distractors(&self) -> &[ShapeId] {
        &self.distractors
    }

    /// Uniform over the non-target shapes. Falls back to the target shape
    /// for a single-shape catalogue.
    pub fn draw_distractor<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeId {
        if self.distractors.is_empty() {
            return self.target;
        }
        self.distractors[rng.random_range(0..self.distractors.len())]
    }
}
