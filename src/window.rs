use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context as _, Result};
use glutin_window::GlutinWindow;
use graphics::{Context, Transformed};
use opengl_graphics::{GlGraphics, GlyphCache, OpenGL, TextureSettings};
use piston::{
    event_loop::{EventSettings, Events},
    window::WindowSettings,
    RenderEvent, Size,
};

use crate::chart::{Chart, ChartCanvas};
use crate::colors::*;
use crate::constants::*;
use crate::utils::rectangle_by_points;
use crate::vec2::F64x2;

/// An explicit `override_path` wins and must exist, otherwise the first
/// candidate that is a file.
pub fn pick_font<P: AsRef<Path>>(override_path: Option<PathBuf>, candidates: &[P]) -> Result<PathBuf> {
    if let Some(path) = override_path {
        if !path.is_file() {
            bail!("{} points at {}, which is not a file", FONT_ENV_VAR, path.display());
        }
        return Ok(path);
    }
    candidates
        .iter()
        .map(AsRef::<Path>::as_ref)
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("no usable font found, set {} to a .ttf file", FONT_ENV_VAR))
}

pub fn find_font() -> Result<PathBuf> {
    pick_font(std::env::var_os(FONT_ENV_VAR).map(PathBuf::from), FONT_CANDIDATES)
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct ChartWindow {
    #[derivative(Debug = "ignore")]
    window: GlutinWindow,
    #[derivative(Debug = "ignore")]
    gl: GlGraphics,
    #[derivative(Debug = "ignore")]
    glyphs: GlyphCache<'static>,
    font: PathBuf,
}

impl ChartWindow {
    pub fn open(title: &str) -> Result<Self> {
        let font = find_font()?;

        // Change this to OpenGL::V2_1 if not working.
        let opengl = OpenGL::V3_2;

        let window: GlutinWindow = WindowSettings::new(title, [200, 200])
            .graphics_api(opengl)
            .exit_on_esc(true)
            .size(Size {
                width: WINDOW_SIZE[0],
                height: WINDOW_SIZE[1],
            })
            .vsync(true)
            .samples(4)
            .build()
            .map_err(|e| anyhow!("failed to open chart window: {}", e))?;

        let gl = GlGraphics::new(opengl);
        let glyphs = GlyphCache::new(&font, (), TextureSettings::new())
            .with_context(|| format!("failed to load font {}", font.display()))?;

        Ok(Self {
            window,
            gl,
            glyphs,
            font,
        })
    }

    /// redraws `chart` whenever asked to until the window closes
    pub fn run(&mut self, chart: &Chart) -> Result<()> {
        debug!("{:?}", self);
        info!("chart text uses {}", self.font.display());
        let mut events = Events::new(event_settings());

        while let Some(e) = events.next(&mut self.window) {
            if let Some(args) = e.render_args() {
                let size = F64x2::from(args.window_size);
                let glyphs = &mut self.glyphs;

                self.gl.draw(args.viewport(), |c, gl| {
                    graphics::clear(WHITE, gl);
                    let mut canvas = PistonCanvas { c: &c, gl, glyphs };
                    chart.draw(&mut canvas, size);
                });
            }
        }
        info!("chart window closed");
        Ok(())
    }
}

/// the chart never changes, so only redraw on window events
fn event_settings() -> EventSettings {
    let mut es = EventSettings::new();
    es.lazy = true;
    es
}

pub fn show(chart: &Chart) -> Result<()> {
    ChartWindow::open(WINDOW_TITLE)?.run(chart)
}

struct PistonCanvas<'a> {
    c: &'a Context,
    gl: &'a mut GlGraphics,
    glyphs: &'a mut GlyphCache<'static>,
}

impl ChartCanvas for PistonCanvas<'_> {
    fn line(&mut self, color: Color, radius: f64, from: F64x2, to: F64x2) {
        graphics::line_from_to(
            color,
            radius,
            <[f64; 2]>::from(from),
            <[f64; 2]>::from(to),
            self.c.transform,
            self.gl,
        );
    }

    fn rect(&mut self, color: Color, c0: F64x2, c1: F64x2) {
        graphics::rectangle(color, rectangle_by_points(c0, c1), self.c.transform, self.gl);
    }

    fn text(&mut self, color: Color, size: u32, at: F64x2, text: &str) {
        if let Err(err) = graphics::Text::new_color(color, size).draw(
            text,
            self.glyphs,
            &self.c.draw_state,
            self.c.transform.trans(at.x, at.y),
            self.gl,
        ) {
            warn!("failed to draw {:?}: {:?}", text, err);
        }
    }
}
