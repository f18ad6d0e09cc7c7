use palette::{FromColor, Hsv, Srgb};

pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const GRID_GREY: Color = [0.0, 0.0, 0.0, 0.25];
pub const LEGEND_BG: Color = [1.0, 1.0, 1.0, 0.85];

/// golden angle, keeps successive hues far apart however many series there are
const HUE_STEP: f32 = 137.507_77;

/// Line color for the `index`th series on a chart.
pub fn series_color(index: usize) -> Color {
    let hue = (index as f32 * HUE_STEP) % 360.0;
    let hsv: Hsv = Hsv::new(hue, 0.8, 0.8);
    let rgb: Srgb = Srgb::from_color(hsv);
    [rgb.red, rgb.green, rgb.blue, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_colors_are_opaque_and_distinct() {
        let colors: Vec<Color> = (0..9).map(series_color).collect();
        for (i, a) in colors.iter().enumerate() {
            assert_eq!(a[3], 1.0);
            assert!(a[..3].iter().all(|c| (0.0..=1.0).contains(c)));
            for b in &colors[i + 1..] {
                let diff: f32 = a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum();
                assert!(diff > 0.05, "{:?} vs {:?}", a, b);
            }
        }
    }
}
