
use {
    smallvec::SmallVec,
    std::fmt::{Debug, Formatter},
};

#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct Rect {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl Debug for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rect")
            .field("x1", &self.x1)
            .field("y1", &self.y1)
            .field("width", &(self.x2 - self.x1))
            .field("height", &(self.y2 - self.y1))
            .finish()
    }
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Option<Self> {
        if x2 < x1 || y2 < y1 {
            return None;
        }
        Some(Self { x1, y1, x2, y2 })
    }

    pub fn new_sized(x1: i32, y1: i32, width: i32, height: i32) -> Option<Self> {
        if width < 0 || height < 0 {
            return None;
        }
        Self::new(x1, y1, x1.checked_add(width)?, y1.checked_add(height)?)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.x1 <= x && self.y1 <= y && self.x2 > x && self.y2 > y
    }

    pub fn is_empty(&self) -> bool {
        self.x1 == self.x2 || self.y1 == self.y2
    }

    pub fn move_(&self, dx: i32, dy: i32) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }

    pub fn at_point(&self, x: i32, y: i32) -> Self {
        self.move_(x - self.x1, y - self.y1)
    }

    /// Converts a point from the surrounding space into rect-local space.
    pub fn translate(&self, x: i32, y: i32) -> (i32, i32) {
        (x - self.x1, y - self.y1)
    }

    pub fn translate_inv(&self, x: i32, y: i32) -> (i32, i32) {
        (x + self.x1, y + self.y1)
    }

    /// The closest point inside the rect. Empty rects clamp to their origin.
    pub fn clamp_point(&self, x: i32, y: i32) -> (i32, i32) {
        let x = x.min(self.x2 - 1).max(self.x1);
        let y = y.min(self.y2 - 1).max(self.y1);
        (x, y)
    }

    pub fn x1(&self) -> i32 {
        self.x1
    }

    pub fn x2(&self) -> i32 {
        self.x2
    }

    pub fn y1(&self) -> i32 {
        self.y1
    }

    pub fn y2(&self) -> i32 {
        self.y2
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

/// A union of rects in surface-local coordinates.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct Region {
    rects: SmallVec<[Rect; 1]>,
}

impl Region {
    pub fn new(rect: Rect) -> Self {
        let mut rects = SmallVec::new();
        if !rect.is_empty() {
            rects.push(rect);
        }
        Self { rects }
    }

    pub fn from_rects(rects: &[Rect]) -> Self {
        Self {
            rects: rects.iter().copied().filter(|r| !r.is_empty()).collect(),
        }
    }

    pub fn add(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.rects.push(rect);
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rects.iter().any(|r| r.contains(x, y))
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn extents(&self) -> Rect {
        let mut iter = self.rects.iter();
        let Some(first) = iter.next() else {
            return Rect::default();
        };
        iter.fold(*first, |acc, r| Rect {
            x1: acc.x1.min(r.x1),
            y1: acc.y1.min(r.y1),
            x2: acc.x2.max(r.x2),
            y2: acc.y2.max(r.y2),
        })
    }
}
