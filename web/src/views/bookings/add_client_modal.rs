use booking_types::{Client, NewClient, PaymentTerms, INDUSTRY_TAGS};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::state::use_bookings_data;
use crate::components::{use_toaster, ModalShell, Toast};
use crate::server::booking_error;
use crate::server_clients::{create_agency_client, update_agency_client};

fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn text_input(
    client: RwSignal<NewClient>,
    label: &'static str,
    placeholder: &'static str,
    get: fn(&NewClient) -> String,
    set: fn(&mut NewClient, String),
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label>{label}</label>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || client.with(get)
                on:input=move |ev| client.update(|c| set(c, event_target_value(&ev)))
            />
        </div>
    }
}

/// Client form body. `compact` drops the address, tag and notes fields, as
/// in the inline "New Client" panel of the booking modal.
#[component]
pub fn ClientFields(client: RwSignal<NewClient>, #[prop(optional)] compact: bool) -> impl IntoView {
    view! {
        <div class="client-fields">
            <div class="form-row">
                {text_input(client, "Company Name *", "Acme Inc.", |c| c.company.clone(), |c, v| c.company = v)}
                {text_input(client, "Contact Name *", "John Doe", |c| c.contact_name.clone(), |c, v| c.contact_name = v)}
            </div>
            <div class="form-row">
                {text_input(
                    client,
                    "Email",
                    "john@example.com",
                    |c| c.email.clone().unwrap_or_default(),
                    |c, v| c.email = optional_text(v),
                )}
                {text_input(
                    client,
                    "Phone",
                    "+1 (555) 123-4567",
                    |c| c.phone.clone().unwrap_or_default(),
                    |c, v| c.phone = optional_text(v),
                )}
            </div>

            {(!compact).then(|| view! {
                <div class="form-row">
                    {text_input(
                        client,
                        "Website",
                        "https://example.com",
                        |c| c.website.clone().unwrap_or_default(),
                        |c, v| c.website = optional_text(v),
                    )}
                    {text_input(
                        client,
                        "Address",
                        "123 Main St, New York, NY 10001",
                        |c| c.address.clone().unwrap_or_default(),
                        |c, v| c.address = optional_text(v),
                    )}
                </div>
            })}

            <div class="form-field">
                <label>"Payment Terms"</label>
                <select
                    prop:value=move || client.with(|c| c.terms.as_str())
                    on:change=move |ev| {
                        if let Some(terms) = PaymentTerms::parse(&event_target_value(&ev)) {
                            client.update(|c| c.terms = terms);
                        }
                    }
                >
                    {PaymentTerms::ALL
                        .iter()
                        .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                        .collect_view()}
                </select>
            </div>

            {(!compact).then(|| view! {
                <div class="form-field">
                    <label>"Industry/Category Tags"</label>
                    <div class="tag-picker">
                        {INDUSTRY_TAGS
                            .iter()
                            .map(|tag| {
                                let tag = *tag;
                                view! {
                                    <button
                                        type="button"
                                        class=move || {
                                            if client.with(|c| c.industry_tags.iter().any(|t| t == tag)) {
                                                "tag-chip active"
                                            } else {
                                                "tag-chip"
                                            }
                                        }
                                        on:click=move |_| client.update(|c| c.toggle_tag(tag))
                                    >
                                        {tag}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
                <div class="form-field">
                    <label>"Notes & Preferences"</label>
                    <textarea
                        placeholder="Any special notes, preferences, or important information about this client..."
                        prop:value=move || client.with(|c| c.notes.clone().unwrap_or_default())
                        on:input=move |ev| client.update(|c| c.notes = optional_text(event_target_value(&ev)))
                    ></textarea>
                </div>
            })}
        </div>
    }
}

/// Creates a client, or edits `editing` when it holds one.
#[component]
pub fn AddClientModal(show: RwSignal<bool>, editing: RwSignal<Option<Client>>) -> impl IntoView {
    let data = use_bookings_data();
    let toaster = use_toaster();
    let client = RwSignal::new(NewClient::default());
    let saving = RwSignal::new(false);

    Effect::new(move |_| {
        if show.get() {
            let form = editing
                .with_untracked(|e| e.as_ref().map(NewClient::from))
                .unwrap_or_default();
            client.set(form);
        }
    });

    let save = move |_| {
        let body = client.get_untracked();
        if let Err(e) = body.validate() {
            toaster.push(Toast::error("Missing information", e.detail()));
            return;
        }
        saving.set(true);
        let editing_id = editing.with_untracked(|e| e.as_ref().map(|c| c.id));
        let token = data.token();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => update_agency_client(token, id, body).await,
                None => create_agency_client(token, body).await,
            };
            match result.map_err(booking_error) {
                Ok(saved) => {
                    let verb = if editing_id.is_some() { "updated" } else { "added" };
                    toaster.push(Toast::success(
                        "Client saved",
                        format!("{} was {}.", saved.company, verb),
                    ));
                    data.upsert_client(saved);
                    show.set(false);
                }
                Err(e) => toaster.push(Toast::error("Failed to save client", e.detail())),
            }
            saving.set(false);
        });
    };

    let title = Signal::derive(move || {
        if editing.with(Option::is_some) {
            "Edit Client".to_string()
        } else {
            "Add New Client".to_string()
        }
    });

    view! {
        <ModalShell show=show title=title>
            <ClientFields client=client/>
            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| show.set(false)>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || saving.get() || !client.with(NewClient::is_complete))
                    on_click=save
                >
                    {move || if saving.get() { "Saving..." } else { "Save Client" }}
                </Button>
            </div>
        </ModalShell>
    }
}
