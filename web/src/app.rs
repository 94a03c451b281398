use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};
use thaw::ssr::SSRMountStyleProvider;
use thaw::*;

use crate::components::{provide_toaster, ToastHost};
use crate::utils::settings::provide_channel_settings;
use crate::views::bookings::BookingsView;
use crate::views::brand_dashboard::BrandDashboard;
use crate::views::not_found::NotFoundPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <SSRMountStyleProvider>
            <!DOCTYPE html>
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <AutoReload options=options.clone() />
                    <HydrationScripts options/>
                    <MetaTags/>
                </head>
                <body>
                    <App/>
                </body>
            </html>
        </SSRMountStyleProvider>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        // id=leptos lets cargo-leptos hot-reload the stylesheet
        <Stylesheet id="leptos" href="/pkg/web.css"/>
        <Title text="Agency Bookings"/>

        <ConfigProvider>
            <Router>
                <main>
                    <Routes fallback=|| view! { <NotFoundPage/> }>
                        <Route path=StaticSegment("") view=AgencyBookingsPage/>
                        <Route path=StaticSegment("brand") view=BrandDashboard/>
                    </Routes>
                </main>
            </Router>
        </ConfigProvider>
    }
}

/// Agency screens share one toaster and one set of channel toggles.
#[component]
fn AgencyBookingsPage() -> impl IntoView {
    provide_toaster();
    provide_channel_settings();

    view! {
        <BookingsView/>
        <ToastHost/>
    }
}
