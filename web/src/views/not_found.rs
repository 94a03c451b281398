use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let navigate = use_navigate();
    let to_bookings = {
        let navigate = navigate.clone();
        move |_| navigate("/", Default::default())
    };
    let to_brand = move |_| navigate("/brand", Default::default());

    view! {
        <div class="not-found">
            <div class="not-found-card">
                <p class="not-found-code">"404"</p>
                <h1>"Page Not Found"</h1>
                <p class="muted">"The page you're looking for doesn't exist or may have been moved."</p>
                <div class="not-found-actions">
                    <Button appearance=ButtonAppearance::Primary on_click=to_bookings>
                        "Go to Bookings"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=to_brand>
                        "Brand Dashboard"
                    </Button>
                </div>
            </div>
        </div>
    }
}
