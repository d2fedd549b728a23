use crate::core::geometry::Point;
use crate::core::timebase::Frame;
use crate::search::shapes::ShapeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Target,
    Distractor,
}

/// One slot of the display. Slots live for the whole session; each cycle
/// overwrites the fields in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub role: Role,
    pub shape: ShapeId,
    /// `None` until the first placement, and while the slot is being re-placed.
    pub position: Option<Point>,
    pub visible_until: Frame,
    pub invisible_until: Frame,
}

impl Item {
    pub fn unplaced() -> Self {
        Self {
            role: Role::Distractor,
            shape: 0,
            position: None,
            visible_until: 0,
            invisible_until: 1,
        }
    }

    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }

    pub fn is_visible(&self, frame: Frame) -> bool {
        frame < self.visible_until
    }

    pub fn is_expired(&self, frame: Frame) -> bool {
        frame >= self.invisible_until
    }

    pub fn is_target(&self) -> bool {
        self.role == Role::Target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_then_expired() {
        let item = Item {
            role: Role::Distractor,
            shape: 1,
            position: Some(Point::ORIGIN),
            visible_until: 10,
            invisible_until: 25,
        };
        assert!(item.is_visible(9));
        assert!(!item.is_visible(10));
        assert!(!item.is_expired(24));
        assert!(item.is_expired(25));
    }

    #[test]
    fn unplaced_is_inactive() {
        let item = Item::unplaced();
        assert!(!item.is_active());
        assert!(item.visible_until < item.invisible_until);
    }
}
