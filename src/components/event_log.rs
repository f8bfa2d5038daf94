use yew::prelude::*;

use crate::state::{GestureLog, mark_color};

#[derive(Properties, PartialEq, Clone)]
pub struct EventLogProps {
    pub log: GestureLog,
    pub on_clear: Callback<()>,
}

#[function_component(EventLogPanel)]
pub fn event_log_panel(props: &EventLogProps) -> Html {
    let clear = {
        let cb = props.on_clear.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let row_style = "display:flex; gap:8px; font-size:12px; font-variant-numeric:tabular-nums;";
    html! {
        <div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; width:260px; max-height:60vh; overflow-y:auto; display:flex; flex-direction:column; gap:6px; pointer-events:auto;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <strong>{"Gestures"}</strong>
                <button onclick={clear} style="padding:2px 8px; font-size:11px;">{"Clear"}</button>
            </div>
            { for props.log.entries.iter().map(|e| html! {
                <div key={e.seq} style={row_style}>
                    <span style={format!("min-width:84px; font-weight:600; color:{};", mark_color(e.kind))}>{ e.kind.name() }</span>
                    <span style="opacity:0.8;">{ e.summary.clone() }</span>
                </div>
            }) }
        </div>
    }
}
