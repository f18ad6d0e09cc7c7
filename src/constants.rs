/// the game steps its physics this many times per second
pub const TIMESTEPS_PER_SECOND: f64 = 30.0;
pub const MILLIS_BETWEEN_TIMESTEPS: f64 = 1000.0 / TIMESTEPS_PER_SECOND;
/// seconds per step
pub const DT: f64 = MILLIS_BETWEEN_TIMESTEPS / 1000.0;

/// below this speed the game snaps a piece's velocity to zero
pub const VELOCITY_FLOOR: f64 = 0.01;

// default sweep
pub const FRICTION_COEFFS: [f64; 3] = [0.4, 0.6, 0.8];
pub const LAUNCH_SPEEDS: [f64; 3] = [80.0, 120.0, 200.0];
pub const TIMESTEPS: u32 = 1000;

pub const WINDOW_TITLE: &str = "slingtune";
pub const WINDOW_SIZE: [f64; 2] = [1_000.0, 700.0];

/// space around the plot area, in points: left, top, right, bottom
pub const PLOT_MARGINS: [f64; 4] = [80.0, 30.0, 30.0, 60.0];
/// how many ticks each axis aims for
pub const TARGET_TICKS: usize = 8;
pub const TICK_LEN: f64 = 5.0;
/// dash, gap
pub const GRID_DASH: [f64; 2] = [6.0, 4.0];
pub const SERIES_LINE_RADIUS: f64 = 1.0;
pub const FONT_SIZE: u32 = 14;
/// rough average glyph advance as a fraction of the font size, for layout only
pub const GLYPH_ADVANCE: f64 = 0.6;

/// overrides the font used for chart text
pub const FONT_ENV_VAR: &str = "SLINGTUNE_FONT";
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// files with this in their name are treated as piece images
pub const SVG_MARKER: &str = "svg";
pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";
