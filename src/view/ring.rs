use eframe::egui::{self, Color32, Pos2};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Parse `#RRGGBB` or `#RGB`, with or without the hash
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
	let hex = hex.trim().trim_start_matches('#');
	if !hex.is_ascii() {
		return None;
	}
	let channel = |s: &str| u8::from_str_radix(s, 16).ok();
	match hex.len() {
		6 => Some(Color32::from_rgb(
			channel(&hex[0..2])?,
			channel(&hex[2..4])?,
			channel(&hex[4..6])?,
		)),
		3 => {
			let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
			Some(Color32::from_rgb(short(0)?, short(1)?, short(2)?))
		}
		_ => None,
	}
}

/// Points along a clockwise arc starting at 12 o'clock covering `fraction` of the circle
pub fn arc_points(center: Pos2, radius: f32, fraction: f32, segments: usize) -> Vec<Pos2> {
	let fraction = fraction.clamp(0.0, 1.0);
	if fraction <= 0.0 || segments == 0 {
		return Vec::new();
	}
	let steps = ((segments as f32 * fraction).ceil() as usize).max(1);
	(0..=steps)
		.map(|i| {
			let angle = -FRAC_PI_2 + TAU * fraction * (i as f32 / steps as f32);
			Pos2::new(
				center.x + radius * angle.cos(),
				center.y + radius * angle.sin(),
			)
		})
		.collect()
}

/// Circular progress ring with the phase label and countdown in the middle
pub fn draw_progress_ring(
	ui: &mut egui::Ui,
	diameter: f32,
	percent: f32,
	color: Color32,
	label: &str,
	seconds: u32,
) {
	let (rect, _) = ui.allocate_exact_size(egui::vec2(diameter, diameter), egui::Sense::hover());
	let painter = ui.painter_at(rect);
	let center = rect.center();
	let stroke_width = (diameter * 0.06).max(4.0);
	let radius = diameter / 2.0 - stroke_width;

	painter.circle_stroke(
		center,
		radius,
		egui::Stroke::new(stroke_width, Color32::from_gray(60)),
	);

	let points = arc_points(center, radius, percent / 100.0, 128);
	if points.len() >= 2 {
		painter.add(egui::Shape::line(
			points,
			egui::Stroke::new(stroke_width, color),
		));
	}

	painter.text(
		center - egui::vec2(0.0, diameter * 0.08),
		egui::Align2::CENTER_CENTER,
		label,
		egui::FontId::proportional((diameter * 0.085).max(12.0)),
		color,
	);
	painter.text(
		center + egui::vec2(0.0, diameter * 0.1),
		egui::Align2::CENTER_CENTER,
		seconds.to_string(),
		egui::FontId::monospace((diameter * 0.16).max(16.0)),
		Color32::WHITE,
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn parses_hex_colors() {
		assert_eq!(
			parse_hex_color("#9CAF88"),
			Some(Color32::from_rgb(0x9C, 0xAF, 0x88))
		);
		assert_eq!(
			parse_hex_color("b4a7d6"),
			Some(Color32::from_rgb(0xB4, 0xA7, 0xD6))
		);
		assert_eq!(parse_hex_color("#fff"), Some(Color32::WHITE));
		assert_eq!(parse_hex_color("#12345"), None);
		assert_eq!(parse_hex_color("#zzzzzz"), None);
		assert_eq!(parse_hex_color("lavender"), None);
	}

	#[test]
	fn arc_starts_at_top_and_runs_clockwise() {
		let center = Pos2::new(50.0, 50.0);
		assert!(arc_points(center, 45.0, 0.0, 64).is_empty());

		let quarter = arc_points(center, 45.0, 0.25, 64);
		let first = quarter[0];
		let last = *quarter.last().unwrap();
		assert_relative_eq!(first.x, 50.0, epsilon = 1e-4);
		assert_relative_eq!(first.y, 5.0, epsilon = 1e-4);
		// Screen y grows downwards, so a quarter turn clockwise lands at 3 o'clock
		assert_relative_eq!(last.x, 95.0, epsilon = 1e-3);
		assert_relative_eq!(last.y, 50.0, epsilon = 1e-3);

		let full = arc_points(center, 45.0, 1.5, 64);
		assert_eq!(full.len(), 65);
	}
}
