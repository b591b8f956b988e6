use gloo::render::{AnimationFrame, request_animation_frame};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use yew::prelude::*;

use crate::state::TrackAnimation;
use crate::util::fmt_num;

#[derive(Properties, PartialEq, Clone)]
pub struct TrackPathProps {
    pub class: String,
    pub d: String,
    pub animation: TrackAnimation,
}

/// A track path that reveals itself once by sliding its dash offset to zero.
///
/// The pending animation frame lives in the component; unmounting drops it,
/// which cancels the frame, so a torn-down map never receives a callback.
#[function_component(TrackPath)]
pub fn track_path(props: &TrackPathProps) -> Html {
    let anim = props.animation;
    let offset = use_state(|| anim.length);
    {
        let offset = offset.clone();
        use_effect_with(anim, move |anim| {
            let anim = *anim;
            let slot: Rc<RefCell<Option<AnimationFrame>>> = Rc::new(RefCell::new(None));
            let started = Rc::new(Cell::new(None::<f64>));
            offset.set(anim.length);
            schedule_frame(slot.clone(), started, anim, offset);
            move || {
                slot.borrow_mut().take();
            }
        });
    }

    html! {
        <path
            class={props.class.clone()}
            d={props.d.clone()}
            stroke-dasharray={anim.dash_array()}
            stroke-dashoffset={fmt_num(*offset)}
        />
    }
}

fn schedule_frame(
    slot: Rc<RefCell<Option<AnimationFrame>>>,
    started: Rc<Cell<Option<f64>>>,
    anim: TrackAnimation,
    offset: UseStateHandle<f64>,
) {
    let next = slot.clone();
    let frame = request_animation_frame(move |timestamp| {
        let start = started.get().unwrap_or(timestamp);
        started.set(Some(start));
        let elapsed = timestamp - start;
        offset.set(anim.dash_offset_at(elapsed));
        if !anim.is_finished(elapsed) {
            schedule_frame(next, started, anim, offset);
        }
    });
    *slot.borrow_mut() = Some(frame);
}
