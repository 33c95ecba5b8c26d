use dioxus::prelude::*;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    // The server build serves the app and mounts the upload proxy beside it.
    #[cfg(feature = "server")]
    dioxus::serve(|| async move { Ok(dioxus::server::router(App).merge(proxy_router()?)) });
}

#[cfg(feature = "server")]
fn proxy_router() -> anyhow::Result<axum::Router> {
    use anyhow::Context;

    let config = api::proxy::ProxyConfig::from_env().context("invalid proxy configuration")?;
    dioxus_logger::tracing::info!("backend base url: {}", config.backend_base_url());
    let state = api::proxy::ProxyState::new(config).context("could not build backend client")?;
    Ok(api::proxy::router(state))
}

#[component]
fn App() -> Element {
    ui::App()
}
