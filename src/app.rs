//! Root application component wiring the shell into `leptos_router`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The shell owns routing decisions; `leptos_router` only reports location
//! changes. A single wildcard route hands every location to `ShellOutlet`.
//! The outlet runs the transition and either renders the host's view or
//! replaces the location with the redirect target.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::{NavigateOptions, WildcardSegment};

use crate::config::ShellConfig;
use crate::net::gateway::Gateway;
use crate::net::transport::GlooTransport;
use crate::router::guard::NavigationGuard;
use crate::router::navigator::BrowserNavigator;
use crate::router::routes::{RouteTable, View};
use crate::router::transition::{Routing, ShellRouter};
use crate::state::session::SessionStore;
use crate::state::storage::{BrowserStorage, KeyValueStorage};

pub type BrowserGateway = Gateway<GlooTransport, BrowserNavigator>;

/// Host-supplied rendering for each view identifier.
pub type ViewRenderer = Arc<dyn Fn(View) -> AnyView + Send + Sync>;

/// Everything views need, provided once as context.
#[derive(Clone)]
pub struct ShellContext {
    pub config: ShellConfig,
    pub session: SessionStore,
    pub router: ShellRouter,
    pub gateway: Arc<BrowserGateway>,
}

impl ShellContext {
    pub fn new(config: ShellConfig, table: RouteTable, storage: Arc<dyn KeyValueStorage>) -> Self {
        let session = SessionStore::new(storage, config.storage_keys.clone());
        let guard = NavigationGuard::new(session.clone(), &config);
        let router = ShellRouter::new(table, guard);
        let gateway = Gateway::new(&config, GlooTransport::new(&config), BrowserNavigator, session.clone());
        Self { config, session, router, gateway: Arc::new(gateway) }
    }

    /// Standard routes persisted in `localStorage`.
    pub fn browser(config: ShellConfig) -> Self {
        Self::new(config, RouteTable::standard(), Arc::new(BrowserStorage))
    }
}

#[component]
pub fn App(context: ShellContext, render: ViewRenderer) -> impl IntoView {
    provide_context(context);

    let fallback_render = render.clone();
    view! {
        <Router>
            <Routes fallback=move || view! { <ShellOutlet render=fallback_render.clone()/> }>
                <Route path=WildcardSegment("any") view=move || view! { <ShellOutlet render=render.clone()/> }/>
            </Routes>
        </Router>
    }
}

/// Runs the guard for the current location.
#[component]
fn ShellOutlet(render: ViewRenderer) -> impl IntoView {
    let shell = expect_context::<ShellContext>();
    let location = use_location();
    let navigate = use_navigate();

    let routing = Memo::new(move |_| {
        let target = location_of(&location.pathname.get(), &location.search.get());
        shell.router.route(&target, &BrowserNavigator)
    });

    Effect::new(move || {
        if let Ok(Routing::Redirect(path)) = routing.get() {
            navigate(&path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match routing.get() {
        Ok(Routing::Render(view)) => render(view),
        Ok(Routing::Redirect(_)) => ().into_any(),
        Err(e) => {
            log::error!("routing failed: {e}");
            ().into_any()
        }
    }
}

/// Join a router pathname and search string into one location.
fn location_of(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{search}")
    }
}

/// Mount the shell to `<body>` with console logging.
///
/// Configuration comes from the build environment; an invalid value is
/// logged and the defaults are used.
#[cfg(feature = "csr")]
pub fn mount(render: ViewRenderer) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let config = ShellConfig::from_build_env().unwrap_or_else(|e| {
        log::error!("invalid shell config, using defaults: {e}");
        ShellConfig::default()
    });
    log::info!("mounting shell, api base {:?}", config.api_base);

    let context = ShellContext::browser(config);
    leptos::mount::mount_to_body(move || view! { <App context=context render=render/> });
}
