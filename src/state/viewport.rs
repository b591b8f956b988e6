// Viewport state plus the DOM-side helpers: container width and footer placement.
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::Reducible;

use crate::config::MapConfig;

/// Width of the current render pass and its generation; every resize starts a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub generation: u64,
}

pub enum ViewportAction {
    Resize { width: u32 },
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            generation: 0,
        }
    }
}

impl Reducible for Viewport {
    type Action = ViewportAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            // same width still rebuilds; nothing from the previous pass is reused
            ViewportAction::Resize { width } => Rc::new(Viewport {
                width,
                generation: self.generation + 1,
            }),
        }
    }
}

/// Current pixel width of the configured width source, or the default width.
pub fn container_width(config: &MapConfig) -> u32 {
    let width = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(&config.width_source).ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| el.offset_width())
        .unwrap_or(0);
    resolve_width(width, config.default_width)
}

pub fn resolve_width(measured: i32, default_width: u32) -> u32 {
    if measured > 0 { measured as u32 } else { default_width }
}

/// Moves every `.footer` element to `top` pixels.
pub fn reposition_footer(top: f64) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(nodes) = document.query_selector_all(".footer") else {
        return;
    };
    for i in 0..nodes.length() {
        if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            let _ = el.style().set_property("top", &format!("{}px", top));
        }
    }
}
