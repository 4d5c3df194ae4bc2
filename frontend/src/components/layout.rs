//! Application shell for the signed-in portal: sidebar, header, footer.

use gpportal_shared::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_client;
use crate::auth::{logout, use_auth};
use crate::components::icons::{
    ChevronLeft, ChevronRight, FileText, Gear, Landmark, LayoutDashboard, LogOut, Menu,
    ShieldCheck, TrendingUp, UserRound,
};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// One sidebar entry. Closes the mobile drawer after navigating.
#[component]
fn SidebarLink(
    route: AppRoute,
    label: &'static str,
    collapsed: ReadSignal<bool>,
    set_open: WriteSignal<bool>,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = route.to_path();
    let target = route.clone();
    let is_active = Signal::derive(move || router.current_route().get() == route);
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target.to_path());
        set_open.set(false);
    };
    view! {
        <li>
            <a
                href=href
                on:click=on_click
                class:active=is_active
                class="flex items-center gap-3"
                title=label
            >
                {children()}
                <Show when=move || !collapsed.get()>
                    <span>{label}</span>
                </Show>
            </a>
        </li>
    }
}

#[component]
fn Sidebar(
    open: ReadSignal<bool>,
    set_open: WriteSignal<bool>,
    collapsed: ReadSignal<bool>,
    set_collapsed: WriteSignal<bool>,
) -> impl IntoView {
    let auth = use_auth();
    let is_admin = Signal::derive(move || {
        auth.session
            .with(|s| s.role().is_some_and(|role| role == Role::Admin))
    });

    let aside_class = move || {
        let width = if collapsed.get() { "w-20" } else { "w-64" };
        let slide = if open.get() {
            "translate-x-0"
        } else {
            "-translate-x-full lg:translate-x-0"
        };
        format!(
            "fixed lg:static z-40 h-full min-h-screen bg-base-100 border-r border-base-300 \
             transition-all duration-200 {width} {slide}"
        )
    };

    view! {
        // Click-away backdrop for the mobile drawer.
        <Show when=move || open.get()>
            <div
                class="fixed inset-0 z-30 bg-black/40 lg:hidden"
                on:click=move |_| set_open.set(false)
            ></div>
        </Show>
        <aside class=aside_class>
            <div class="flex items-center justify-between p-4">
                <Show when=move || !collapsed.get()>
                    <span class="text-lg font-bold text-primary">"GP Portal"</span>
                </Show>
                <button
                    class="btn btn-ghost btn-sm hidden lg:inline-flex"
                    on:click=move |_| set_collapsed.update(|c| *c = !*c)
                >
                    <Show
                        when=move || collapsed.get()
                        fallback=|| view! { <ChevronLeft attr:class="h-4 w-4" /> }
                    >
                        <ChevronRight attr:class="h-4 w-4" />
                    </Show>
                </button>
            </div>
            <ul class="menu px-2 gap-1">
                <SidebarLink route=AppRoute::Dashboard label="Dashboard" collapsed=collapsed set_open=set_open>
                    <LayoutDashboard attr:class="h-5 w-5" />
                </SidebarLink>
                <SidebarLink route=AppRoute::Deals label="Deals" collapsed=collapsed set_open=set_open>
                    <Landmark attr:class="h-5 w-5" />
                </SidebarLink>
                <SidebarLink route=AppRoute::Documents label="Documents" collapsed=collapsed set_open=set_open>
                    <FileText attr:class="h-5 w-5" />
                </SidebarLink>
                <SidebarLink route=AppRoute::Investments label="Investments" collapsed=collapsed set_open=set_open>
                    <TrendingUp attr:class="h-5 w-5" />
                </SidebarLink>
                <SidebarLink route=AppRoute::Profiles label="Profiles" collapsed=collapsed set_open=set_open>
                    <UserRound attr:class="h-5 w-5" />
                </SidebarLink>
                <SidebarLink route=AppRoute::Settings label="Settings" collapsed=collapsed set_open=set_open>
                    <Gear attr:class="h-5 w-5" />
                </SidebarLink>
            </ul>
            <Show when=move || is_admin.get()>
                <div class="divider px-4 my-1 text-xs text-base-content/50">
                    <Show when=move || !collapsed.get()>"Admin"</Show>
                </div>
                <ul class="menu px-2 gap-1">
                    <SidebarLink route=AppRoute::AdminDocuments label="All documents" collapsed=collapsed set_open=set_open>
                        <ShieldCheck attr:class="h-5 w-5" />
                    </SidebarLink>
                    <SidebarLink route=AppRoute::AdminInvestments label="All investments" collapsed=collapsed set_open=set_open>
                        <TrendingUp attr:class="h-5 w-5" />
                    </SidebarLink>
                    <SidebarLink route=AppRoute::AdminProfiles label="All profiles" collapsed=collapsed set_open=set_open>
                        <UserRound attr:class="h-5 w-5" />
                    </SidebarLink>
                </ul>
            </Show>
        </aside>
    }
}

#[component]
fn Header(set_open: WriteSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let client = use_client();

    let email = Signal::derive(move || {
        auth.session.with(|s| {
            s.profile()
                .and_then(|p| p.contact_email.clone())
                .unwrap_or_default()
        })
    });

    let on_logout = move |_| {
        let client = client.clone();
        spawn_local(async move {
            logout(&auth, &client).await;
        });
    };

    view! {
        <header class="navbar bg-base-100 border-b border-base-300 px-4">
            <div class="flex-none lg:hidden">
                <button class="btn btn-ghost btn-sm" on:click=move |_| set_open.set(true)>
                    <Menu attr:class="h-5 w-5" />
                </button>
            </div>
            <div class="flex-1">
                <span class="text-base font-semibold lg:hidden">"GP Portal"</span>
            </div>
            <div class="flex-none flex items-center gap-3">
                <Show when=move || !email.get().is_empty()>
                    <span class="text-sm text-base-content/70 hidden sm:inline">
                        {move || email.get()}
                    </span>
                </Show>
                <button class="btn btn-ghost btn-sm" on:click=on_logout>
                    <LogOut attr:class="h-4 w-4" />
                    <span class="hidden sm:inline">"Sign out"</span>
                </button>
            </div>
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let year = js_sys::Date::new_0().get_full_year();
    view! {
        <footer class="footer footer-center p-4 text-xs text-base-content/50 border-t border-base-300">
            <p>{format!("© {year} GP Portal. For accredited investors only.")}</p>
        </footer>
    }
}

/// Shell around every portal screen.
#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    let (open, set_open) = signal(false);
    let (collapsed, set_collapsed) = signal(false);

    view! {
        <div class="flex min-h-screen bg-base-200">
            <Sidebar open=open set_open=set_open collapsed=collapsed set_collapsed=set_collapsed />
            <div class="flex flex-1 flex-col min-w-0">
                <Header set_open=set_open />
                <main class="flex-1 p-4 lg:p-6">{children()}</main>
                <Footer />
            </div>
        </div>
    }
}
