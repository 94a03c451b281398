use leptos::prelude::*;
use thaw::{Spinner, SpinnerSize};

#[component]
pub fn LoadingView(
    message: Option<String>,
    /// Small spinner for use inside cards and modals.
    #[prop(optional)]
    compact: bool,
) -> impl IntoView {
    let size = if compact {
        SpinnerSize::Small
    } else {
        SpinnerSize::Large
    };

    view! {
        <div class=if compact { "loading-container compact" } else { "loading-container" }>
            <Spinner size=size />
            <p class="loading-message">
                {message.unwrap_or_else(|| "Loading...".to_string())}
            </p>
        </div>
    }
}
