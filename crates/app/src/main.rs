use dioxus::prelude::*;
use shared_types::FeatureFlags;

mod auth;
mod guard;
mod routes;
use auth::{use_auth, AuthState, Identity};
use routes::Route;

const THEME: Asset = asset!("/assets/theme.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        server::config::load_feature_flags();
        let flags = server::config::feature_flags();

        if flags.telemetry {
            server::telemetry::init_telemetry();
        }
        server::health::record_start_time();

        let pool = server::db::create_pool();
        if let Err(e) = server::db::run_migrations(&pool).await {
            tracing::error!(error = %e, "Database migrations failed");
        }

        if flags.storage {
            if let Err(e) = server::storage::issue_images().await {
                tracing::error!(error = %e, "Issue image storage unavailable");
            }
        }

        let mut router =
            dioxus::server::router(App).merge(server::openapi::api_router(pool.clone()));

        if flags.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        let router = router
            .layer(axum::extract::DefaultBodyLimit::max(
                server::config::max_upload_bytes(),
            ))
            .layer(axum::middleware::from_fn_with_state(
                pool,
                server::auth::middleware::auth_middleware,
            ))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

/// Detect the client platform from compile-time feature flags.
pub fn client_platform() -> &'static str {
    if cfg!(feature = "web") {
        "web"
    } else if cfg!(feature = "desktop") {
        "desktop"
    } else if cfg!(feature = "mobile") {
        "mobile"
    } else {
        "unknown"
    }
}

#[component]
fn App() -> Element {
    // Set the X-Client-Platform header on all server function calls
    use_hook(|| {
        use dioxus::fullstack::{set_request_headers, HeaderMap, HeaderValue};

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-client-platform",
            HeaderValue::from_static(client_platform()),
        );
        set_request_headers(headers);
    });

    // Fetch feature flags once and provide via context (defaults all-off on error)
    let flags_resource =
        use_server_future(move || async move { server::api::get_feature_flags().await })?;

    let flags = flags_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(FeatureFlags::default()))
        .unwrap_or_default();

    use_context_provider(|| flags);
    use_context_provider(AuthState::new);
    let identity = use_context_provider(Identity::new);

    // Resolve the session once at startup; every view learns the result
    // through the identity hub.
    let mut auth = use_auth();
    use_future(move || {
        let identity = identity.clone();
        async move {
            let user = server::api::get_current_user().await.ok().flatten();
            match &user {
                Some(u) => auth.set_user(u.clone()),
                None => auth.clear_auth(),
            }
            identity.publish(user);
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: THEME }
        SuspenseBoundary {
            fallback: |_| rsx! {
                div { class: "page-loading",
                    p { "Loading..." }
                }
            },
            Router::<Route> {}
        }
    }
}
