//! Records shared by every bookings tab. Loaded once when the page mounts
//! and patched in place after each successful write.

use booking_types::{BookOut, Booking, Client, Talent};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::server::{get_agency_talents, list_book_outs, list_bookings};
use crate::server_clients::get_agency_clients;
use crate::utils::auth::get_auth_token;

#[derive(Clone, Copy)]
pub struct BookingsData {
    token: StoredValue<String>,
    pub bookings: RwSignal<Vec<Booking>>,
    pub book_outs: RwSignal<Vec<BookOut>>,
    pub clients: RwSignal<Vec<Client>>,
    pub talents: RwSignal<Vec<Talent>>,
    pub loading: RwSignal<bool>,
}

impl BookingsData {
    pub fn token(&self) -> String {
        self.token.get_value()
    }

    /// Reads the session token and fetches everything. Failed loads leave
    /// an empty list behind.
    pub fn load_all(&self) {
        self.token.set_value(get_auth_token());
        self.reload_bookings();
        self.reload_book_outs();
        self.reload_clients();
        self.reload_talents();
    }

    pub fn reload_bookings(&self) {
        let data = *self;
        data.loading.set(true);
        spawn_local(async move {
            match list_bookings(data.token(), None, None).await {
                Ok(list) => data.bookings.set(list),
                Err(e) => {
                    warn!("failed to load bookings: {}", e);
                    data.bookings.set(Vec::new());
                }
            }
            data.loading.set(false);
        });
    }

    pub fn reload_book_outs(&self) {
        let data = *self;
        spawn_local(async move {
            match list_book_outs(data.token(), None, None).await {
                Ok(list) => data.book_outs.set(list),
                Err(e) => {
                    warn!("failed to load book-outs: {}", e);
                    data.book_outs.set(Vec::new());
                }
            }
        });
    }

    pub fn reload_clients(&self) {
        let data = *self;
        spawn_local(async move {
            match get_agency_clients(data.token()).await {
                Ok(list) => data.clients.set(list),
                Err(e) => {
                    warn!("failed to load clients: {}", e);
                    data.clients.set(Vec::new());
                }
            }
        });
    }

    pub fn reload_talents(&self) {
        let data = *self;
        spawn_local(async move {
            match get_agency_talents(data.token(), None).await {
                Ok(list) => data.talents.set(list),
                Err(e) => {
                    warn!("failed to load talents: {}", e);
                    data.talents.set(Vec::new());
                }
            }
        });
    }

    pub fn upsert_booking(&self, booking: Booking) {
        self.bookings
            .update(|list| upsert_by_id(list, booking, |b| b.id));
    }

    pub fn upsert_client(&self, client: Client) {
        self.clients.update(|list| upsert_by_id(list, client, |c| c.id));
    }

    pub fn push_book_out(&self, book_out: BookOut) {
        self.book_outs
            .update(|list| upsert_by_id(list, book_out, |bo| bo.id));
    }

    pub fn remove_book_out(&self, id: i64) {
        self.book_outs.update(|list| list.retain(|bo| bo.id != id));
    }

    pub fn remove_client(&self, id: i64) {
        self.clients.update(|list| list.retain(|c| c.id != id));
    }
}

pub fn provide_bookings_data() -> BookingsData {
    let data = BookingsData {
        token: StoredValue::new(String::new()),
        bookings: RwSignal::new(Vec::new()),
        book_outs: RwSignal::new(Vec::new()),
        clients: RwSignal::new(Vec::new()),
        talents: RwSignal::new(Vec::new()),
        loading: RwSignal::new(true),
    };
    provide_context(data);
    data
}

pub fn use_bookings_data() -> BookingsData {
    use_context::<BookingsData>().unwrap_or_else(provide_bookings_data)
}

/// Replaces the entry with the same id, or puts a new one at the front.
fn upsert_by_id<T>(list: &mut Vec<T>, item: T, id: impl Fn(&T) -> i64) {
    let key = id(&item);
    match list.iter_mut().find(|existing| id(existing) == key) {
        Some(slot) => *slot = item,
        None => list.insert(0, item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_in_place() {
        let mut list = vec![(1_i64, "a"), (2, "b")];
        upsert_by_id(&mut list, (2, "B"), |t| t.0);
        assert_eq!(list, vec![(1, "a"), (2, "B")]);
    }

    #[test]
    fn upsert_puts_new_entries_first() {
        let mut list = vec![(1_i64, "a")];
        upsert_by_id(&mut list, (7, "z"), |t| t.0);
        assert_eq!(list, vec![(7, "z"), (1, "a")]);
    }
}
