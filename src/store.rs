use crate::{AABox, Segment};

/// The ordered collection of all currently visible segments.
///
/// Insertion order is render order. There is no uniqueness constraint:
/// retracing the same line records a second segment with the same geometry.
#[derive(Clone, Debug, Default)]
pub struct StrokeStore {
	segments: Vec<Segment>,
}

impl StrokeStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn append(&mut self, segment: Segment) {
		self.segments.push(segment);
	}

	pub fn clear(&mut self) {
		self.segments.clear();
	}

	/// Removes every segment sharing the candidate's exact endpoints,
	/// preserving the relative order of the rest, and returns how many were
	/// removed. This is an equality filter, not tolerance-based hit testing.
	pub fn remove_matching(&mut self, candidate: &Segment) -> usize {
		let before = self.segments.len();
		self
			.segments
			.retain(|segment| !segment.endpoints_match(candidate));
		before - self.segments.len()
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	pub fn len(&self) -> usize {
		self.segments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// Union of all segment bounds; empty when the store is.
	pub fn bounds(&self) -> AABox {
		self
			.segments
			.iter()
			.map(Segment::bounds)
			.fold(AABox::empty(), AABox::union)
	}

	/// Segments a renderer repainting `region` has to consider.
	pub fn segments_in(&self, region: AABox) -> impl Iterator<Item = &Segment> {
		self
			.segments
			.iter()
			.filter(move |segment| segment.bounds().intersects(&region))
	}
}

impl<'a> IntoIterator for &'a StrokeStore {
	type Item = &'a Segment;
	type IntoIter = std::slice::Iter<'a, Segment>;
	fn into_iter(self) -> Self::IntoIter {
		self.segments.iter()
	}
}
