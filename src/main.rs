use admin_table::app::App;
use admin_table::platform::desktop::paths::default_webview_data_dir;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");
    info!(
        "admin-table {} starting (webview data: {})",
        env!("CARGO_PKG_VERSION"),
        webview_data_dir.display()
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Members"))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}
