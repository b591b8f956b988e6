use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::locator_map::LocatorMap;
use crate::config::MapConfig;
use crate::frame::{self, FrameNotifier};
use crate::loader::load_geodata;
use crate::model::GeoData;
use crate::render::{MapScene, build_scene};
use crate::state::{Throttle, ThrottleDecision, Viewport, ViewportAction, container_width, reposition_footer};

#[derive(Properties, PartialEq)]
pub struct AppProps {
    /// Resolved once at mount from the mount element's overrides.
    pub config: Rc<MapConfig>,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    let notifier: Rc<Box<dyn FrameNotifier>> = use_memo((), |_| frame::detect());
    let data = use_state(|| None::<Rc<GeoData>>);
    let viewport = {
        let config = config.clone();
        use_reducer(move || Viewport::new(container_width(&config)))
    };
    let loaded = (*data).is_some();

    // Fetch the geodata exactly once
    {
        let data = data.clone();
        let url = config.data_url.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_geodata(&url).await {
                    Ok(d) => data.set(Some(Rc::new(d))),
                    Err(e) => log::error!("{}", e),
                }
            });
            || ()
        });
    }

    // Once data is in: re-measure, then follow window resizes (throttled)
    {
        let viewport = viewport.clone();
        let config = config.clone();
        use_effect_with(loaded, move |loaded| {
            let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
            let mut listener = None;
            if *loaded {
                let width = container_width(&config);
                if width != viewport.width {
                    viewport.dispatch(ViewportAction::Resize { width });
                }
                let throttle = Rc::new(RefCell::new(Throttle::new(config.resize_throttle_ms)));
                let pending = pending.clone();
                if let Some(window) = web_sys::window() {
                    listener = Some(EventListener::new(&window, "resize", move |_| {
                        let decision = throttle.borrow_mut().on_event(js_sys::Date::now());
                        match decision {
                            ThrottleDecision::RunNow => {
                                viewport.dispatch(ViewportAction::Resize {
                                    width: container_width(&config),
                                });
                            }
                            ThrottleDecision::RunAfter(ms) => {
                                let throttle = throttle.clone();
                                let viewport = viewport.clone();
                                let config = config.clone();
                                *pending.borrow_mut() = Some(Timeout::new(ms, move || {
                                    throttle.borrow_mut().on_trailing(js_sys::Date::now());
                                    viewport.dispatch(ViewportAction::Resize {
                                        width: container_width(&config),
                                    });
                                }));
                            }
                            ThrottleDecision::Coalesced => log::debug!("resize coalesced"),
                        }
                    }));
                }
            }
            move || {
                drop(listener);
                pending.borrow_mut().take();
            }
        });
    }

    let scene: Option<Rc<MapScene>> = (*data).as_ref().and_then(|d| {
        match build_scene(d, viewport.width, &config) {
            Ok(scene) => Some(Rc::new(scene)),
            Err(e) => {
                log::error!("render pass {} failed: {}", viewport.generation, e);
                None
            }
        }
    });

    // After each pass: footer follows the map, the embedding frame learns the height
    {
        let dims = scene
            .as_ref()
            .map(|s| (s.height, s.footer_top, s.is_mobile, s.animations().count()));
        let notifier = notifier.clone();
        let width = viewport.width;
        use_effect_with((viewport.generation, loaded), move |(generation, _)| {
            if let Some((height, footer_top, is_mobile, animated)) = dims {
                reposition_footer(footer_top);
                notifier.notify(frame::content_height(height, frame::measure_document_height()));
                log::info!(
                    "render pass {}: {}x{} mobile={} animated paths={}",
                    generation,
                    width,
                    height,
                    is_mobile,
                    animated
                );
            }
            || ()
        });
    }

    match scene {
        Some(scene) => html! {
            <LocatorMap key={viewport.generation.to_string()} {scene} />
        },
        None => Html::default(),
    }
}
