//! Feedback page: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Provide the `Component` implementation that delegates to
//!   `update::update` and `view::view`.
//! - On first render, start the paged load of existing reviews and open the
//!   realtime insert subscription (both skipped when the service is not
//!   configured).
//! - On teardown, set the shared cancellation flag so the pager loop stops
//!   between pages and the realtime task winds down instead of writing into
//!   a discarded component.

use std::cell::Cell;
use std::rc::Rc;

use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::pager::{PAGE_SIZE, Pager};

use crate::supabase::{Supabase, realtime};

mod helpers;
mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::FeedbackPage;

impl Component for FeedbackPage {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        FeedbackPage::new(Supabase::from_env())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;

            if let Some(client) = self.client.clone() {
                start_initial_load(client.clone(), self.cancelled.clone(), ctx.link().clone());
                realtime::subscribe_inserts(
                    client,
                    self.cancelled.clone(),
                    ctx.link().callback(Msg::RealtimeInsert),
                );
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.cancelled.set(true);
    }
}

/// Drives the page-until-short-page load. The cancellation flag is checked
/// between page fetches; a fetch error aborts the rest of the load and
/// surfaces the message, keeping the pages merged so far.
fn start_initial_load(client: Supabase, cancelled: Rc<Cell<bool>>, link: Scope<FeedbackPage>) {
    spawn_local(async move {
        let mut pager = Pager::new(PAGE_SIZE);
        while let Some((from, to)) = pager.next_range() {
            if cancelled.get() {
                return;
            }
            match client.fetch_page(from, to).await {
                Ok(page) => {
                    if cancelled.get() {
                        return;
                    }
                    pager.record(page.len());
                    link.send_message(Msg::PageLoaded(page));
                }
                Err(err) => {
                    link.send_message(Msg::LoadFailed(err.to_string()));
                    return;
                }
            }
        }
        link.send_message(Msg::LoadFinished);
    });
}
