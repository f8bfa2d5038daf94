use canvas_gestures::GestureConfig;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub config: GestureConfig,
    pub on_close: Callback<()>,
    pub on_change: Callback<GestureConfig>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_multi_cb = {
        let cb = props.on_change.clone();
        let config = props.config.clone();
        Callback::from(move |_| {
            cb.emit(GestureConfig {
                use_multi: !config.use_multi,
                ..config.clone()
            })
        })
    };
    let toggle_sync_cb = {
        let cb = props.on_change.clone();
        let config = props.config.clone();
        Callback::from(move |_| {
            cb.emit(GestureConfig {
                frame_sync: !config.frame_sync,
                ..config.clone()
            })
        })
    };
    let defaults_cb = {
        let cb = props.on_change.clone();
        Callback::from(move |_| cb.emit(GestureConfig::default()))
    };

    let c = &props.config;
    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Gesture Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={c.use_multi} onclick={toggle_multi_cb} />
                    <span>{"Two-finger zoom & rotate"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={c.frame_sync} onclick={toggle_sync_cb} />
                    <span>{"Sync touch moves to animation frames"}</span>
                </label>
            </div>
            <div style="font-size:12px; line-height:1.5; opacity:0.75;">
                { format!(
                    "tap ≤ {}px / {}ms · swipe > {}px in < {}ms · long tap {}ms · double tap {}ms",
                    c.tap_max_distance, c.tap_max_duration_ms, c.swipe_min_distance,
                    c.swipe_max_duration_ms, c.long_tap_delay_ms, c.double_tap_interval_ms
                ) }
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={defaults_cb} style="flex:1;">{"Restore Defaults"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
        </div>
    </div>}
}
