use bon::builder;
use glam::Vec2;
use itertools::Itertools;

use crate::{AABox, Color, Segment, StrokeStore};

/// What a drag gesture means right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
pub enum Mode {
	/// Drags append segments to the store.
	#[display("draw")]
	Draw,
	/// The next drag is an erase key instead of a stroke.
	#[display("erase")]
	Erase,
}

/// One step of a drag gesture: the pointer's position and how far it moved
/// since the previous event, exactly as host gesture recognizers report it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragDelta {
	pub position: Vec2,
	pub delta: Vec2,
}

impl DragDelta {
	pub fn new(position: Vec2, delta: Vec2) -> Self {
		Self { position, delta }
	}

	/// The line covered by this step, ending at the current position.
	fn segment(&self, color: Color, width: f32) -> Segment {
		Segment::with_width(self.position - self.delta, self.position, color, width)
	}
}

/// Discrete host inputs as values, for wiring and replay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
	Drag(DragDelta),
	ToggleErase,
	Clear,
	SetColor(Color),
	ToggleWord,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
	#[error("palette must contain at least one color")]
	EmptyPalette,

	#[error("palette contains {0} more than once")]
	DuplicatePaletteColor(Color),

	#[error("stroke width must be positive and finite, got {0}")]
	InvalidStrokeWidth(f32),
}

static_assertions::assert_impl_all!(SessionError: std::error::Error, Send, Sync);

/// Builds a [DrawingSession].
///
/// ```
/// let session = scrawl::session()
/// 	.word("sky".to_string())
/// 	.stroke_width(4.0)
/// 	.create()
/// 	.unwrap();
/// assert!(session.segments().is_empty());
/// ```
#[builder(finish_fn = create)]
pub fn session(
	#[builder(default = Color::PALETTE.to_vec())] palette: Vec<Color>,
	#[builder(default = Segment::DEFAULT_WIDTH)] stroke_width: f32,
	color: Option<Color>,
	word: Option<String>,
) -> Result<DrawingSession, SessionError> {
	if !(stroke_width.is_finite() && stroke_width > 0.0) {
		return Err(SessionError::InvalidStrokeWidth(stroke_width));
	}
	if palette.is_empty() {
		return Err(SessionError::EmptyPalette);
	}
	// Duplicate swatches would be indistinguishable in a picker grid.
	if let Some((_, &duplicate)) = palette
		.iter()
		.map(|color| (color.to_rgba8(), color))
		.duplicates_by(|&(key, _)| key)
		.next()
	{
		return Err(SessionError::DuplicatePaletteColor(duplicate));
	}

	Ok(DrawingSession {
		store: StrokeStore::new(),
		mode: Mode::Draw,
		candidate: None,
		color: color.unwrap_or(Color::BLUE),
		stroke_width,
		palette,
		word,
		word_revealed: false,
		revision: 0,
		damage: AABox::empty(),
	})
}

/// Exclusive owner of the drawing state: the stroke store, the erase-mode
/// flag, the selected color, and the hidden word.
///
/// The host delivers gesture steps and button presses through the methods
/// (or as [Command] values) and reads snapshots back. All mutation happens
/// synchronously on the caller's thread; a host with multi-threaded event
/// delivery must confine the session to one of them.
///
/// Instead of pushing change notifications, the session keeps a monotonic
/// [revision](Self::revision) and accumulates a dirty region for
/// [take_damage](Self::take_damage); the host polls both after delivering
/// input.
#[derive(Debug)]
pub struct DrawingSession {
	store: StrokeStore,
	mode: Mode,
	candidate: Option<Segment>,
	color: Color,
	stroke_width: f32,
	palette: Vec<Color>,
	word: Option<String>,
	word_revealed: bool,
	revision: u64,
	damage: AABox,
}

impl DrawingSession {
	/// Routes one drag step. In [Mode::Draw] the derived segment is appended
	/// to the store; in [Mode::Erase] it becomes the erase candidate and is
	/// consumed immediately, so the mode is back to [Mode::Draw] when this
	/// returns, whether or not anything matched.
	pub fn drag(&mut self, drag: DragDelta) {
		let segment = drag.segment(self.color, self.stroke_width);
		match self.mode {
			Mode::Draw => {
				tracing::trace!(?segment, "append");
				self.damage = self.damage.union(segment.bounds());
				self.store.append(segment);
				self.revision += 1;
			}
			Mode::Erase => {
				self.candidate = Some(segment);
				self.consume_candidate();
			}
		}
	}

	fn consume_candidate(&mut self) {
		let Some(candidate) = self.candidate.take() else {
			return;
		};
		// The bounds of whatever is about to go: matched segments may be
		// wider than the candidate, so the candidate's own bounds are not a
		// safe proxy.
		let erased = self
			.store
			.segments()
			.iter()
			.filter(|segment| segment.endpoints_match(&candidate))
			.map(Segment::bounds)
			.fold(AABox::empty(), AABox::union);
		let removed = self.store.remove_matching(&candidate);
		if removed > 0 {
			self.damage = self.damage.union(erased);
		}
		self.mode = Mode::Draw;
		self.revision += 1;
		tracing::debug!(removed, "erase pass");
	}

	pub fn toggle_erase(&mut self) {
		// A candidate never survives the drag call that created it.
		debug_assert!(self.candidate.is_none());
		self.mode = match self.mode {
			Mode::Draw => Mode::Erase,
			Mode::Erase => Mode::Draw,
		};
		self.revision += 1;
		tracing::debug!(mode = %self.mode, "mode toggled");
	}

	/// Empties the store unconditionally, whatever the mode. Idempotent.
	pub fn clear(&mut self) {
		if self.store.is_empty() {
			return;
		}
		self.damage = self.damage.union(self.store.bounds());
		self.store.clear();
		self.revision += 1;
		tracing::debug!("store cleared");
	}

	/// Selects the color applied to subsequent strokes, typically a value
	/// handed back by the host's picker dialog.
	pub fn set_color(&mut self, color: Color) {
		if color == self.color {
			return;
		}
		tracing::debug!(%color, "color selected");
		self.color = color;
		self.revision += 1;
	}

	pub fn toggle_word(&mut self) {
		self.word_revealed = !self.word_revealed;
		self.revision += 1;
	}

	pub fn apply(&mut self, command: Command) {
		match command {
			Command::Drag(drag) => self.drag(drag),
			Command::ToggleErase => self.toggle_erase(),
			Command::Clear => self.clear(),
			Command::SetColor(color) => self.set_color(color),
			Command::ToggleWord => self.toggle_word(),
		}
	}

	pub fn segments(&self) -> &[Segment] {
		self.store.segments()
	}

	pub fn store(&self) -> &StrokeStore {
		&self.store
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn color(&self) -> Color {
		self.color
	}

	pub fn stroke_width(&self) -> f32 {
		self.stroke_width
	}

	/// The ordered swatch list for the host's picker dialog.
	pub fn palette(&self) -> &[Color] {
		&self.palette
	}

	pub fn word(&self) -> Option<&str> {
		self.word.as_deref()
	}

	pub fn word_revealed(&self) -> bool {
		self.word_revealed
	}

	/// Bumped on every observable state change.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Returns and resets the region whose pixels changed since the last
	/// call; `None` when nothing needs repainting.
	pub fn take_damage(&mut self) -> Option<AABox> {
		let damage = std::mem::replace(&mut self.damage, AABox::empty());
		(!damage.is_empty()).then_some(damage)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test::{drag_between, seg, test_session};

	#[test]
	fn drawing_appends_in_call_order() {
		let mut session = test_session();
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));
		session.drag(drag_between((1.0, 1.0), (2.0, 0.0)));
		assert_eq!(session.segments().len(), 2);
		assert_eq!(session.segments()[0].start, glam::vec2(0.0, 0.0));
		assert_eq!(session.segments()[1].end, glam::vec2(2.0, 0.0));
		assert_eq!(session.mode(), Mode::Draw);
	}

	#[test]
	fn segments_carry_the_selected_color_and_width() {
		let mut session = session().stroke_width(3.0).create().unwrap();
		assert_eq!(session.color(), Color::BLUE);
		session.set_color(Color::RED);
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));
		assert_eq!(session.segments()[0].color, Color::RED);
		assert_eq!(session.segments()[0].width, 3.0);
	}

	#[test]
	fn retracing_while_armed_erases_the_matching_segment() {
		let mut session = test_session();
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));
		session.set_color(Color::RED);

		session.toggle_erase();
		assert_eq!(session.mode(), Mode::Erase);
		// Same geometry, different color: the color is irrelevant to the match.
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));

		assert!(session.segments().is_empty());
		assert_eq!(session.mode(), Mode::Draw);
	}

	#[test]
	fn a_missed_erase_disarms_without_removing_anything() {
		let mut session = test_session();
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));
		session.drag(drag_between((2.0, 2.0), (3.0, 3.0)));

		session.toggle_erase();
		session.drag(drag_between((5.0, 5.0), (6.0, 6.0)));

		assert_eq!(session.segments().len(), 2);
		assert_eq!(session.mode(), Mode::Draw);
	}

	#[test]
	fn erase_removes_every_duplicate() {
		let mut session = test_session();
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));
		session.drag(drag_between((4.0, 4.0), (5.0, 5.0)));

		session.toggle_erase();
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));

		assert_eq!(session.segments().len(), 1);
		assert_eq!(session.segments()[0].start, glam::vec2(4.0, 4.0));
	}

	#[test]
	fn toggling_erase_on_and_off_leaves_the_store_alone() {
		let mut session = test_session();
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));
		let before = session.segments().to_vec();

		session.toggle_erase();
		session.toggle_erase();

		assert_eq!(session.segments(), before.as_slice());
		assert_eq!(session.mode(), Mode::Draw);
	}

	#[test]
	fn clear_empties_the_store_in_any_mode() {
		let mut session = test_session();
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));
		session.toggle_erase();

		session.clear();
		assert!(session.segments().is_empty());
		// The mode flag is untouched.
		assert_eq!(session.mode(), Mode::Erase);

		let revision = session.revision();
		session.clear();
		assert_eq!(session.revision(), revision);
	}

	#[test]
	fn revision_tracks_observable_changes() {
		let mut session = test_session();
		let r0 = session.revision();
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));
		let r1 = session.revision();
		assert!(r1 > r0);

		session.set_color(session.color());
		assert_eq!(session.revision(), r1);

		session.toggle_word();
		assert!(session.revision() > r1);
	}

	#[test]
	fn damage_accumulates_and_drains() {
		let mut session = session().stroke_width(2.0).create().unwrap();
		assert_eq!(session.take_damage(), None);

		session.drag(drag_between((0.0, 0.0), (4.0, 4.0)));
		let damage = session.take_damage().unwrap();
		assert_eq!(damage.min(), glam::vec2(-1.0, -1.0));
		assert_eq!(damage.max(), glam::vec2(5.0, 5.0));
		assert_eq!(session.take_damage(), None);

		// A missed erase repaints nothing.
		session.toggle_erase();
		session.drag(drag_between((10.0, 10.0), (11.0, 11.0)));
		assert_eq!(session.take_damage(), None);

		// A hit repaints the erased region.
		session.toggle_erase();
		session.drag(drag_between((0.0, 0.0), (4.0, 4.0)));
		let damage = session.take_damage().unwrap();
		assert_eq!(damage.min(), glam::vec2(-1.0, -1.0));
		assert_eq!(damage.max(), glam::vec2(5.0, 5.0));
	}

	#[test]
	fn word_starts_hidden_and_toggles() {
		let mut session = test_session();
		assert_eq!(session.word(), Some("sky"));
		assert!(!session.word_revealed());
		session.toggle_word();
		assert!(session.word_revealed());
		session.toggle_word();
		assert!(!session.word_revealed());
	}

	#[test]
	fn commands_match_the_direct_methods() {
		let mut session = test_session();
		session.apply(Command::SetColor(Color::MAGENTA));
		session.apply(Command::Drag(drag_between((0.0, 0.0), (2.0, 2.0))));
		session.apply(Command::ToggleErase);
		session.apply(Command::Drag(drag_between((0.0, 0.0), (2.0, 2.0))));
		session.apply(Command::ToggleWord);
		session.apply(Command::Clear);

		assert!(session.segments().is_empty());
		assert_eq!(session.mode(), Mode::Draw);
		assert_eq!(session.color(), Color::MAGENTA);
		assert!(session.word_revealed());
	}

	#[test]
	fn builder_rejects_bad_options() {
		assert!(matches!(
			session().palette(vec![]).create(),
			Err(SessionError::EmptyPalette)
		));
		assert!(matches!(
			session()
				.palette(vec![Color::RED, Color::BLUE, Color::RED])
				.create(),
			Err(SessionError::DuplicatePaletteColor(color)) if color == Color::RED
		));
		assert!(matches!(
			session().stroke_width(0.0).create(),
			Err(SessionError::InvalidStrokeWidth(_))
		));
		assert!(matches!(
			session().stroke_width(f32::NAN).create(),
			Err(SessionError::InvalidStrokeWidth(_))
		));
	}

	#[test]
	fn builder_defaults_mirror_the_stock_screen() {
		let session = test_session();
		assert_eq!(session.palette(), &Color::PALETTE);
		assert_eq!(session.color(), Color::BLUE);
		assert_eq!(session.stroke_width(), Segment::DEFAULT_WIDTH);
		assert_eq!(session.mode(), Mode::Draw);
		assert_eq!(session.revision(), 0);
	}

	#[test]
	fn erase_candidates_never_outlive_the_drag() {
		let mut session = test_session();
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));
		session.toggle_erase();
		session.drag(drag_between((5.0, 5.0), (6.0, 6.0)));
		// Back in draw mode; this drag must append, not erase.
		session.drag(drag_between((0.0, 0.0), (1.0, 1.0)));
		assert_eq!(session.segments().len(), 2);
	}

	#[test]
	fn store_matches_seg_helper_geometry() {
		let mut session = test_session();
		session.drag(drag_between((1.0, 2.0), (3.0, 4.0)));
		let expected = seg((1.0, 2.0), (3.0, 4.0), Color::BLUE);
		assert!(session.segments()[0].endpoints_match(&expected));
	}
}
