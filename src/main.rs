use glam::{vec2, Vec2};
use scrawl::{session, Command, DragDelta};

fn configure_tracing() -> anyhow::Result<()> {
	let max_level = if cfg!(debug_assertions) {
		tracing::Level::TRACE
	} else {
		tracing::Level::INFO
	};
	tracing::subscriber::set_global_default(
		tracing_subscriber::FmtSubscriber::builder()
			.with_max_level(max_level)
			.finish(),
	)?;
	Ok(())
}

/// Drag steps along a line from `from` to `to`, jittered like a shaky hand.
fn squiggle(rng: &mut fastrand::Rng, from: Vec2, to: Vec2, steps: u32) -> Vec<DragDelta> {
	let mut deltas = Vec::with_capacity(steps as usize);
	let mut position = from;
	for i in 1..=steps {
		let t = i as f32 / steps as f32;
		let jitter = if i == steps {
			Vec2::ZERO
		} else {
			2.0 * vec2(rng.f32() - 0.5, rng.f32() - 0.5)
		};
		let next = from.lerp(to, t) + jitter;
		deltas.push(DragDelta::new(next, next - position));
		position = next;
	}
	deltas
}

fn main() -> anyhow::Result<()> {
	if let Err(error) = configure_tracing() {
		// We can technically continue without logging.
		tracing::error!(error = error.to_string());
	}

	let mut session = session().word("Երկինք".to_string()).create()?;
	let mut rng = fastrand::Rng::with_seed(17);

	let strokes = [
		squiggle(&mut rng, vec2(40.0, 40.0), vec2(220.0, 60.0), 8),
		squiggle(&mut rng, vec2(220.0, 60.0), vec2(180.0, 240.0), 8),
		squiggle(&mut rng, vec2(60.0, 200.0), vec2(200.0, 200.0), 6),
	];
	let colors = session.palette()[..3].to_vec();
	for (stroke, color) in strokes.iter().zip(colors) {
		session.apply(Command::SetColor(color));
		for &step in stroke {
			session.apply(Command::Drag(step));
		}
	}
	tracing::info!(
		segments = session.segments().len(),
		revision = session.revision(),
		"drawn"
	);
	if let Some(damage) = session.take_damage() {
		tracing::info!(?damage, size = ?damage.size(), "repaint");
	}

	// Retrace one step of the first stroke to erase it.
	session.apply(Command::ToggleErase);
	tracing::info!(mode = %session.mode(), "armed");
	session.apply(Command::Drag(strokes[0][3]));
	tracing::info!(
		segments = session.segments().len(),
		mode = %session.mode(),
		"after erase"
	);
	if let Some(damage) = session.take_damage() {
		tracing::info!(?damage, "repaint");
	}

	session.apply(Command::ToggleWord);
	tracing::info!(
		word = session.word().unwrap_or_default(),
		revealed = session.word_revealed(),
		"word toggled"
	);

	session.apply(Command::Clear);
	tracing::info!(
		segments = session.segments().len(),
		revision = session.revision(),
		"cleared"
	);
	Ok(())
}
