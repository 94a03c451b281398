use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

const TOAST_LIFETIME_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastIntent {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub intent: ToastIntent,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            intent: ToastIntent::Success,
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            intent: ToastIntent::Info,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            intent: ToastIntent::Error,
        }
    }
}

/// Queue of visible toasts, provided once at the page root.
#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: RwSignal<Vec<(u64, Toast)>>,
    next_id: StoredValue<u64>,
}

impl Toaster {
    pub fn push(&self, toast: Toast) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|list| list.push((id, toast)));

        let toasts = self.toasts;
        set_timeout(
            move || toasts.update(|list| list.retain(|(tid, _)| *tid != id)),
            std::time::Duration::from_millis(TOAST_LIFETIME_MS),
        );
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|(tid, _)| *tid != id));
    }
}

pub fn provide_toaster() -> Toaster {
    let toaster = Toaster {
        toasts: RwSignal::new(Vec::new()),
        next_id: StoredValue::new(0),
    };
    provide_context(toaster);
    toaster
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().unwrap_or_else(provide_toaster)
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toaster = use_toaster();

    view! {
        <div class="toast-stack">
            <For
                each=move || toaster.toasts.get()
                key=|(id, _)| *id
                children=move |(id, toast)| {
                    let intent = match toast.intent {
                        ToastIntent::Success => MessageBarIntent::Success,
                        ToastIntent::Info => MessageBarIntent::Info,
                        ToastIntent::Error => MessageBarIntent::Error,
                    };
                    view! {
                        <div class="toast" on:click=move |_| toaster.dismiss(id)>
                            <MessageBar intent=intent>
                                <strong class="toast-title">{toast.title}</strong>
                                <span class="toast-description">{toast.description}</span>
                            </MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
