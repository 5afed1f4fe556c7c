//! SURF3D Web - HTML canvas front-end compiled to WASM
//!
//! Draws through the canvas 2D context and exposes the viewer operations to
//! JavaScript.

use surf3d_core::renderer::DEFAULT_BASE_COLOR;
use surf3d_core::{
    helix, Color, DrawingSurface, Engine, EngineConfig, HelixParams, Mesh, ScreenPoint, Tessellation,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const DEFAULT_FONT: &str = "12px sans-serif";
const CAPTION_FONT: &str = "bold 12px Arial";
const CAPTION: &str = "Helicoid surface";

fn to_js(err: surf3d_core::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Drawing surface backed by a canvas 2D context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            context,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn trace_path(&self, points: &[ScreenPoint]) {
        self.context.begin_path();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                self.context.move_to(p.x as f64, p.y as f64);
            } else {
                self.context.line_to(p.x as f64, p.y as f64);
            }
        }
    }
}

impl DrawingSurface for CanvasSurface {
    fn create_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Color, width: Option<u32>) {
        self.context.set_stroke_style(&JsValue::from_str(&color.to_string()));
        self.context.set_line_width(width.unwrap_or(1) as f64);
        self.trace_path(&[from, to]);
        self.context.stroke();
    }

    fn create_polygon(&mut self, points: &[ScreenPoint], fill: Color) {
        if points.is_empty() {
            return;
        }
        self.context.set_fill_style(&JsValue::from_str(&fill.to_string()));
        self.trace_path(points);
        self.context.close_path();
        self.context.fill();
    }

    fn create_text(&mut self, pos: ScreenPoint, text: &str, font: Option<&str>, color: Color) {
        self.context.set_font(font.unwrap_or(DEFAULT_FONT));
        self.context.set_fill_style(&JsValue::from_str(&color.to_string()));
        if let Err(err) = self.context.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("fill_text rejected {:?}: {:?}", text, err);
        }
    }

    fn clear(&mut self) {
        self.context.clear_rect(0.0, 0.0, self.width, self.height);
    }
}

/// Helix viewer bound to a canvas element
#[wasm_bindgen]
pub struct WebRenderer {
    surface: CanvasSurface,
    engine: Engine,
    tessellation: Tessellation,
    params: HelixParams,
    mesh: Mesh,
    wireframe: bool,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the canvas with the given element id
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {:?}", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;

        let engine = Engine::new(EngineConfig {
            width: canvas.width(),
            height: canvas.height(),
            ..EngineConfig::default()
        })
        .map_err(to_js)?;

        let tessellation = Tessellation::helix_default();
        let params = HelixParams::default();
        let mesh = tessellation.generate(&helix, &params).map_err(to_js)?;

        Ok(WebRenderer {
            surface: CanvasSurface::new(&canvas)?,
            engine,
            tessellation,
            params,
            mesh,
            wireframe: false,
        })
    }

    /// Render a frame
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.engine
            .redraw(&mut self.surface, &self.mesh, DEFAULT_BASE_COLOR, self.wireframe)
            .map_err(to_js)?;
        self.surface
            .create_text(ScreenPoint::new(10, 20), CAPTION, Some(CAPTION_FONT), Color::BLACK);
        Ok(())
    }

    /// Update rotation state
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.engine.rotate_by(dx, dy, dz);
    }

    pub fn reset(&mut self) {
        self.engine.reset_rotation();
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    /// Regenerate the surface with new helix parameters, each clamped to
    /// its interactive range
    pub fn set_params(&mut self, alpha: f64, beta: f64, zlim: f64) -> Result<(), JsValue> {
        let params = HelixParams::new(alpha, beta, zlim).clamped();
        log::debug!("set helix params {:?}", params);
        self.mesh = self.tessellation.generate(&helix, &params).map_err(to_js)?;
        self.params = params;
        Ok(())
    }

    pub fn alpha(&self) -> f64 {
        self.params.alpha
    }

    pub fn beta(&self) -> f64 {
        self.params.beta
    }

    pub fn zlim(&self) -> f64 {
        self.params.zlim
    }
}
