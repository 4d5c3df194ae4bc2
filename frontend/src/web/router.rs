//! History-backed router with layered access control.
//!
//! Navigation funnels through [`RouterService`]: the target path is parsed,
//! checked against the caller's access level and either pushed onto the
//! history or replaced by the guard's redirect. A popstate listener covers
//! the browser buttons and an effect re-resolves the current route whenever
//! the access level changes (sign-in, sign-out, a rejected token).

use leptos::prelude::*;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::route::{resolve, Access, AppRoute, Resolution};

/// Parse the pathname the browser currently shows.
fn current_path_route() -> AppRoute {
    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    AppRoute::from_path(&path)
}

fn push_url(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn replace_url(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// Router state shared through context.
#[derive(Clone, Copy)]
pub struct RouterService {
    route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    access: Signal<Access>,
}

impl RouterService {
    fn new(access: Signal<Access>) -> Self {
        let entry = current_path_route();
        let (route, set_route) = signal(entry.clone());
        let service = Self {
            route,
            set_route,
            access,
        };
        // Resolve the entry URL up front so a deep link to a guarded
        // screen never renders before its redirect.
        service.apply(entry, false);
        service
    }

    /// The route currently rendered by the outlet.
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.route
    }

    /// Programmatic navigation. Pushes a history entry unless the guard
    /// redirects elsewhere.
    pub fn navigate(&self, path: &str) {
        self.apply(AppRoute::from_path(path), true);
    }

    /// Browser back/forward already moved the URL; resolve without pushing.
    fn handle_popstate(&self) {
        self.apply(current_path_route(), false);
    }

    /// Resolve `target` for the current access level and commit the result.
    /// Guard redirects always replace the history entry so the back button
    /// never returns to a denied URL.
    fn apply(&self, target: AppRoute, push: bool) {
        let access = self.access.get_untracked();
        let (landed, redirected) = match resolve(&target, access) {
            Resolution::Allow => (target, false),
            Resolution::Redirect(to) => {
                log::debug!("route {target} denied for {access:?}, redirecting to {to}");
                (to, true)
            }
        };
        if push && !redirected {
            push_url(&landed.to_path());
        } else {
            replace_url(&landed.to_path());
        }
        self.set_route.set(landed);
    }
}

/// Get the router (must be used inside Router).
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// Provides the router, installs the popstate listener and keeps the
/// current route aligned with the access level.
#[component]
pub fn Router(access: Signal<Access>, children: Children) -> impl IntoView {
    let service = RouterService::new(access);
    provide_context(service);

    if let Some(window) = web_sys::window() {
        let closure = Closure::<dyn Fn()>::new(move || service.handle_popstate());
        if let Err(err) =
            window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
        {
            log::error!("popstate listener not installed: {err:?}");
        }
        // Lives for the lifetime of the app.
        closure.forget();
    }

    // Sign-in moves the wizard to the portal, sign-out does the reverse,
    // and a demoted session falls off admin screens.
    Effect::new(move |_| {
        let _ = access.get();
        service.apply(service.route.get_untracked(), false);
    });

    children()
}

/// Render the matched page for the current route.
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();
    let route = router.current_route();
    move || matcher(route.get())
}

/// Anchor that routes through the in-app history instead of a full reload.
#[component]
pub fn Link(#[prop(into)] to: String, children: Children) -> impl IntoView {
    let router = use_router();
    let href = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&to);
    };
    view! {
        <a href=href on:click=on_click>
            {children()}
        </a>
    }
}
