mod components;
mod state;

use canvas_gestures::util::init_logging;
use components::app::App;

fn main() {
    init_logging(log::LevelFilter::Debug);
    yew::Renderer::<App>::new().render();
}
