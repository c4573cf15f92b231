use glam::Vec2;

use crate::Color;

/// A single recorded line stroke between two points.
///
/// Segments are immutable once created. For erase matching, identity is
/// exact (start, end) equality; color and width never participate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
	pub start: Vec2,
	pub end: Vec2,
	pub color: Color,
	pub width: f32,
}

impl Segment {
	pub const DEFAULT_WIDTH: f32 = 6.0;

	pub fn new(start: Vec2, end: Vec2, color: Color) -> Self {
		Self::with_width(start, end, color, Self::DEFAULT_WIDTH)
	}

	pub fn with_width(start: Vec2, end: Vec2, color: Color, width: f32) -> Self {
		Self {
			start,
			end,
			color,
			width,
		}
	}

	pub fn endpoints_match(&self, other: &Segment) -> bool {
		self.start == other.start && self.end == other.end
	}

	/// Round caps paint past the endpoints, so pad by half the width.
	pub fn bounds(&self) -> AABox {
		AABox::containing([self.start, self.end]).expanded_by(0.5 * self.width)
	}
}

/// Axis-aligned bounding box. The empty box is the identity for `union`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABox {
	min: Vec2,
	max: Vec2,
}

impl AABox {
	pub fn new(min: Vec2, max: Vec2) -> Self {
		Self { min, max }
	}

	pub fn empty() -> Self {
		Self::new(Vec2::MAX, Vec2::MIN)
	}

	pub fn is_empty(&self) -> bool {
		self.min.x > self.max.x || self.min.y > self.max.y
	}

	pub fn min(&self) -> Vec2 {
		self.min
	}

	pub fn max(&self) -> Vec2 {
		self.max
	}

	pub fn size(&self) -> Vec2 {
		if self.is_empty() {
			Vec2::ZERO
		} else {
			self.max - self.min
		}
	}

	pub fn expanded_to_contain(self, point: Vec2) -> Self {
		Self::new(self.min.min(point), self.max.max(point))
	}

	pub fn containing(points: impl IntoIterator<Item = Vec2>) -> Self {
		points
			.into_iter()
			.fold(Self::empty(), |b, p| b.expanded_to_contain(p))
	}

	pub fn expanded_by(self, margin: f32) -> Self {
		if self.is_empty() {
			self
		} else {
			Self::new(self.min - Vec2::splat(margin), self.max + Vec2::splat(margin))
		}
	}

	pub fn union(self, other: AABox) -> Self {
		Self::new(self.min.min(other.min), self.max.max(other.max))
	}

	pub fn intersects(&self, other: &AABox) -> bool {
		!self.is_empty()
			&& !other.is_empty()
			&& self.min.x <= other.max.x
			&& self.min.y <= other.max.y
			&& other.min.x <= self.max.x
			&& other.min.y <= self.max.y
	}
}
