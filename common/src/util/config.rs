use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RouterConfig {
    /// Distance of the extra grid line added on each side of the scene's
    /// bounding box. `0.0` adds nothing.
    #[serde(default = "default_outer_margin")]
    pub outer_margin: f64,
    /// Break ties between equally long paths by bend count.
    #[serde(default = "default_minimize_bends")]
    pub minimize_bends: bool,
    /// Consult committed wire segments, not just cell flags, during search.
    #[serde(default = "default_respect_segments")]
    pub respect_segments: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            outer_margin: default_outer_margin(),
            minimize_bends: default_minimize_bends(),
            respect_segments: default_respect_segments(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RenderConfig {
    #[serde(default = "default_render_width")]
    pub width: u32,
    #[serde(default = "default_render_height")]
    pub height: u32,
    #[serde(default = "default_draw_cells")]
    pub draw_cells: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_render_width(),
            height: default_render_height(),
            draw_cells: default_draw_cells(),
        }
    }
}

fn default_outer_margin() -> f64 {
    0.0
}

fn default_minimize_bends() -> bool {
    true
}

fn default_respect_segments() -> bool {
    true
}

fn default_render_width() -> u32 {
    1024
}

fn default_render_height() -> u32 {
    1024
}

fn default_draw_cells() -> bool {
    true
}
