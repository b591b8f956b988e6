//! Tells an embedding page how tall the graphic is after each render.
//!
//! Parent pages embed the graphic in an iframe using the pym.js protocol:
//! the child posts `pymxPYMx{id}xPYMxheightxPYMx{height}` to its parent.

use wasm_bindgen::JsValue;

const PYM_DELIMITER: &str = "xPYMx";

pub trait FrameNotifier {
    fn notify(&self, height: u32);
}

/// Used when the graphic is not framed.
pub struct NoopFrameNotifier;

impl FrameNotifier for NoopFrameNotifier {
    fn notify(&self, _height: u32) {}
}

pub struct PymChildNotifier {
    child_id: String,
}

impl PymChildNotifier {
    pub fn new(child_id: impl Into<String>) -> Self {
        Self {
            child_id: child_id.into(),
        }
    }

    pub fn message(&self, height: u32) -> String {
        let height = height.to_string();
        ["pym", self.child_id.as_str(), "height", height.as_str()].join(PYM_DELIMITER)
    }
}

impl FrameNotifier for PymChildNotifier {
    fn notify(&self, height: u32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(Some(parent)) = window.parent() else {
            return;
        };
        if let Err(e) = parent.post_message(&JsValue::from_str(&self.message(height)), "*") {
            log::warn!("frame height notification failed: {:?}", e);
        }
    }
}

/// Height the embedding frame must give the page: never less than the map itself.
pub fn content_height(map_height: u32, document_height: Option<u32>) -> u32 {
    document_height.map_or(map_height, |h| h.max(map_height))
}

/// Laid-out height of the whole page, footer and headline included.
pub fn measure_document_height() -> Option<u32> {
    let document = web_sys::window()?.document()?;
    let body = document.body().map(|b| b.offset_height()).unwrap_or(0);
    let root = document.document_element().map(|e| e.scroll_height()).unwrap_or(0);
    let height = body.max(root);
    (height > 0).then_some(height as u32)
}

/// Picks the pym notifier when the page was given a `childId` and is framed.
pub fn detect() -> Box<dyn FrameNotifier> {
    let Some(window) = web_sys::window() else {
        return Box::new(NoopFrameNotifier);
    };
    let framed = matches!(window.parent(), Ok(Some(parent)) if parent != window);
    let child_id = window
        .location()
        .search()
        .ok()
        .and_then(|q| web_sys::UrlSearchParams::new_with_str(&q).ok())
        .and_then(|params| params.get("childId"));
    match child_id {
        Some(id) if framed => {
            log::debug!("embedded as pym child '{}'", id);
            Box::new(PymChildNotifier::new(id))
        }
        _ => Box::new(NoopFrameNotifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pym_height_message() {
        let n = PymChildNotifier::new("hurricane-map");
        assert_eq!(n.message(675), "pymxPYMxhurricane-mapxPYMxheightxPYMx675");
    }

    #[test]
    fn frame_height_covers_page_below_the_map() {
        // 1200px wide: map is 675 tall, footer starts at 650 and runs past it
        assert_eq!(content_height(675, Some(742)), 742);
        assert_eq!(content_height(675, Some(400)), 675);
        assert_eq!(content_height(675, None), 675);
    }
}
