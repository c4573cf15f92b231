/// RGBA color, components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: f32,
	pub g: f32,
	pub b: f32,
	pub a: f32,
}

impl Color {
	pub const BLACK: Color = Color::opaque(0.0, 0.0, 0.0);
	pub const BLUE: Color = Color::opaque(0.0, 0.0, 1.0);
	pub const YELLOW: Color = Color::opaque(1.0, 1.0, 0.0);
	pub const RED: Color = Color::opaque(1.0, 0.0, 0.0);
	pub const MAGENTA: Color = Color::opaque(1.0, 0.0, 1.0);
	pub const GREEN: Color = Color::opaque(0.0, 1.0, 0.0);

	/// The stock palette offered by the host's color-picker dialog.
	pub const PALETTE: [Color; 6] = [
		Color::BLACK,
		Color::BLUE,
		Color::YELLOW,
		Color::RED,
		Color::MAGENTA,
		Color::GREEN,
	];

	pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
		Self { r, g, b, a }
	}

	pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
		Self::new(r, g, b, 1.0)
	}

	/// Parses any CSS color string ("blue", "#0000ff", "rgb(0 0 255)", ...).
	pub fn parse(s: &str) -> Result<Color, csscolorparser::ParseColorError> {
		Ok(csscolorparser::parse(s)?.into())
	}

	pub fn to_rgba8(self) -> [u8; 4] {
		[self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
	}
}

impl From<csscolorparser::Color> for Color {
	fn from(color: csscolorparser::Color) -> Self {
		Self::new(
			color.r as f32,
			color.g as f32,
			color.b as f32,
			color.a as f32,
		)
	}
}

impl std::fmt::Display for Color {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let [r, g, b, a] = self.to_rgba8();
		write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_css_names_and_hex() {
		assert_eq!(Color::parse("blue").unwrap(), Color::BLUE);
		assert_eq!(Color::parse("#ff0000").unwrap(), Color::RED);
		assert!(Color::parse("not a color").is_err());
	}

	#[test]
	fn displays_as_rgba_hex() {
		assert_eq!(Color::BLUE.to_string(), "#0000ffff");
		assert_eq!(Color::new(1.0, 0.0, 0.0, 0.0).to_string(), "#ff000000");
	}

	#[test]
	fn quantizes_to_rgba8() {
		assert_eq!(Color::YELLOW.to_rgba8(), [255, 255, 0, 255]);
		assert_eq!(Color::new(-1.0, 2.0, 0.5, 1.0).to_rgba8(), [0, 255, 128, 255]);
	}
}
