use canvas_gestures::{GestureConfig, GestureEvent};
use yew::prelude::*;

use super::{event_log::EventLogPanel, gesture_canvas::GestureCanvas, settings_modal::SettingsModal};
use crate::state::{GestureLog, LogAction};

const CONFIG_KEY: &str = "cg_gesture_config";

fn load_config() -> GestureConfig {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(raw)) = store.get_item(CONFIG_KEY) {
                match GestureConfig::from_json(&raw) {
                    Ok(config) => return config,
                    Err(e) => log::warn!("ignoring stored gesture config: {e}"),
                }
            }
        }
    }
    GestureConfig::default()
}

fn store_config(config: &GestureConfig) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            let _ = store.set_item(CONFIG_KEY, &config.to_json());
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(load_config);
    let gesture_log = use_reducer(GestureLog::default);
    let open_settings = use_state(|| false);

    // Persist config changes
    use_effect_with((*config).clone(), move |c| {
        store_config(c);
        || ()
    });

    let on_gesture = {
        let dispatcher = gesture_log.dispatcher();
        Callback::from(move |e: GestureEvent| dispatcher.dispatch(LogAction::Record(e)))
    };
    let on_clear = {
        let dispatcher = gesture_log.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(LogAction::Clear))
    };
    let on_change = {
        let config = config.clone();
        Callback::from(move |c: GestureConfig| config.set(c))
    };
    let toggle_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_| open_settings.set(!*open_settings))
    };
    let close_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_| open_settings.set(false))
    };

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; background:#0e1116; color:#c9d1d9; font-family:sans-serif;">
            <GestureCanvas config={(*config).clone()} {on_gesture} />
            <EventLogPanel log={(*gesture_log).clone()} {on_clear} />
            <div style="position:absolute; top:12px; left:12px;">
                <button onclick={toggle_settings}>{"Settings"}</button>
            </div>
            <SettingsModal
                show={*open_settings}
                config={(*config).clone()}
                on_close={close_settings}
                {on_change}
            />
        </div>
    }
}
