use std::rc::Rc;
use yew::prelude::*;

use super::track_path::TrackPath;
use crate::render::{MapScene, PathLayer, SceneLabel};
use crate::util::{fmt_num, translate};

#[derive(Properties, PartialEq, Clone)]
pub struct LocatorMapProps {
    pub scene: Rc<MapScene>,
}

#[function_component(LocatorMap)]
pub fn locator_map(props: &LocatorMapProps) -> Html {
    let scene = &props.scene;
    let bar = &scene.scale_bar;
    html! {
        <div class="graphic-wrapper">
            <svg width={scene.width.to_string()} height={scene.height.to_string()}>
                <g class="paths">
                    { for scene.path_layers.iter().map(path_layer) }
                </g>
                <g class="labels">
                    { for scene.label_layers.iter().map(|layer| html! {
                        <g class={layer.class.clone()}>
                            { for layer.labels.iter().map(label) }
                        </g>
                    }) }
                    { for scene.annotations.iter().map(label) }
                </g>
                <g class="scale-bar">
                    <line
                        x1={fmt_num(bar.start.x)}
                        y1={fmt_num(bar.start.y)}
                        x2={fmt_num(bar.end.x)}
                        y2={fmt_num(bar.end.y)}
                    />
                    <text x={fmt_num(bar.label_position.x)} y={fmt_num(bar.label_position.y)}>
                        { bar.label.clone() }
                    </text>
                </g>
            </svg>
        </div>
    }
}

fn path_layer(layer: &PathLayer) -> Html {
    html! {
        <g class={layer.group.name()}>
            { for layer.paths.iter().map(|p| match p.animation {
                Some(animation) => html! {
                    <TrackPath class={p.class.clone()} d={p.d.clone()} {animation} />
                },
                None => html! { <path class={p.class.clone()} d={p.d.clone()} /> },
            }) }
        </g>
    }
}

fn label(l: &SceneLabel) -> Html {
    html! {
        <text class={l.class.clone()} transform={translate(l.position.x, l.position.y)}>
            { l.text.clone() }
        </text>
    }
}
