mod app;

use app::config::AppConfig;
use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_window();
    app::logger::init(config.log_level);
    log::info!("tagprompt starting against {}", config.base_url);
    mount_to_body(move || view! { <App config=config.clone() /> })
}
