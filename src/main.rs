mod classify;
mod components;
mod config;
mod error;
mod frame;
mod geometry;
mod labels;
mod loader;
mod model;
mod render;
mod state;
mod topology;
mod util;

use std::rc::Rc;

use components::app::{App, AppProps};
use config::{MOUNT_SELECTOR, MapConfig};

fn main() {
    console_error_panic_hook::set_once();
    util::init_logging(log::LevelFilter::Info);
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(MOUNT_SELECTOR).ok().flatten());
    match root {
        Some(root) => {
            let config = Rc::new(MapConfig::from_element(&root));
            yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
        }
        None => log::error!("mount point {} not found", MOUNT_SELECTOR),
    }
}
