use gtk4::prelude::*;
use gtk4 as gtk;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::api::client::ApiClient;
use crate::api::models::Role;

const POLL_INTERVAL: Duration = Duration::from_millis(2000);

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Poll bookkeeping. The epoch is bumped whenever the endpoint base changes
/// or the view is torn down; each read captures the epoch it was issued
/// under and its result is dropped if the epoch has moved on by the time it
/// resolves.
struct PollState {
    base: RefCell<String>,
    epoch: Cell<u64>,
    timer: RefCell<Option<glib::SourceId>>,
}

impl PollState {
    fn new() -> Self {
        Self {
            base: RefCell::new(String::new()),
            epoch: Cell::new(0),
            timer: RefCell::new(None),
        }
    }

    fn retarget(&self, base: &str) -> u64 {
        self.epoch.set(self.epoch.get() + 1);
        *self.base.borrow_mut() = base.to_string();
        self.epoch.get()
    }

    fn invalidate(&self) {
        self.epoch.set(self.epoch.get() + 1);
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.get()
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.get() == epoch
    }
}

/// The message board: polled message list on top, composer row below.
pub struct BoardView {
    root: gtk::Box,
    list: gtk::Box,
    entry: gtk::Entry,
    send_btn: gtk::Button,
    poll: PollState,
}

impl BoardView {
    pub fn new() -> Rc<Self> {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);
        root.set_vexpand(true);

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        let list = gtk::Box::new(gtk::Orientation::Vertical, 6);
        scroller.set_child(Some(&list));
        root.append(&scroller);

        // Composer row
        let input_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let entry = gtk::Entry::new();
        entry.set_hexpand(true);
        entry.set_placeholder_text(Some(Role::default().placeholder()));
        let send_btn = gtk::Button::with_label("Send");
        send_btn.add_css_class("suggested-action");
        send_btn.set_sensitive(false);
        input_row.append(&entry);
        input_row.append(&send_btn);
        root.append(&input_row);

        let view = Rc::new(Self {
            root,
            list,
            entry,
            send_btn,
            poll: PollState::new(),
        });
        view.set_messages(Vec::new());

        {
            let send_btn = view.send_btn.clone();
            view.entry.connect_changed(move |entry| {
                send_btn.set_sensitive(!is_blank(&entry.text()));
            });
        }
        {
            let view2 = view.clone();
            view.send_btn.connect_clicked(move |_| view2.submit());
        }
        {
            let view2 = view.clone();
            view.entry.connect_activate(move |_| view2.submit());
        }
        {
            let view2 = view.clone();
            view.root.connect_destroy(move |_| view2.shutdown());
        }

        view
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn set_role(&self, role: Role) {
        self.entry.set_placeholder_text(Some(role.placeholder()));
    }

    /// Points the poller at a new base URL: cancels the current timer,
    /// fetches immediately, and schedules the next tick. Reads still in
    /// flight against the old base are dropped by the epoch check.
    pub fn set_base(self: &Rc<Self>, base: &str) {
        self.poll.retarget(base);
        self.restart_timer();
    }

    fn restart_timer(self: &Rc<Self>) {
        if let Some(id) = self.poll.timer.borrow_mut().take() {
            id.remove();
        }
        self.poll_once();
        let view = self.clone();
        let id = glib::timeout_add_local(POLL_INTERVAL, move || {
            view.poll_once();
            glib::ControlFlow::Continue
        });
        self.poll.timer.borrow_mut().replace(id);
    }

    fn poll_once(self: &Rc<Self>) {
        let base = self.poll.base.borrow().clone();
        if is_blank(&base) {
            return;
        }
        let epoch = self.poll.current_epoch();
        let rx = crate::utils::run_async_to_main(async move {
            let client = ApiClient::new();
            client.fetch_messages(&base).await
        });
        let view = self.clone();
        rx.attach(None, move |res| {
            if !view.poll.is_current(epoch) {
                return glib::ControlFlow::Continue;
            }
            match res {
                Ok(msgs) => view.set_messages(msgs),
                // A failed read keeps the previous list; the next tick
                // retries naturally.
                Err(err) => log::warn!("failed to fetch messages: {err}"),
            }
            glib::ControlFlow::Continue
        });
    }

    fn submit(self: &Rc<Self>) {
        let text = self.entry.text().to_string();
        if is_blank(&text) {
            return;
        }
        let base = self.poll.base.borrow().clone();
        let rx = crate::utils::run_async_to_main(async move {
            let client = ApiClient::new();
            client.send_message(&base, &text).await
        });
        let view = self.clone();
        rx.attach(None, move |res| {
            match res {
                Ok(()) => view.entry.set_text(""),
                // Input is kept so the user can retry the send as typed.
                Err(err) => log::error!("failed to send message: {err}"),
            }
            glib::ControlFlow::Continue
        });
    }

    fn set_messages(&self, msgs: Vec<String>) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        if msgs.is_empty() {
            let lbl = gtk::Label::new(Some("No messages yet"));
            lbl.add_css_class("dim-label");
            lbl.set_halign(gtk::Align::Start);
            self.list.append(&lbl);
            return;
        }
        for text in msgs {
            let lbl = gtk::Label::new(Some(&text));
            lbl.add_css_class("card");
            lbl.set_halign(gtk::Align::Start);
            lbl.set_xalign(0.0);
            lbl.set_wrap(true);
            lbl.set_margin_top(4);
            lbl.set_margin_bottom(4);
            self.list.append(&lbl);
        }
    }

    fn shutdown(&self) {
        self.poll.invalidate();
        if let Some(id) = self.poll.timer.borrow_mut().take() {
            id.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_blank, PollState};

    #[test]
    fn blank_input_is_not_submittable() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank("hello"));
        assert!(!is_blank("  x "));
    }

    #[test]
    fn retarget_invalidates_in_flight_epochs() {
        let poll = PollState::new();
        let epoch = poll.retarget("http://a");
        assert!(poll.is_current(epoch));
        let next = poll.retarget("http://b");
        assert!(!poll.is_current(epoch));
        assert!(poll.is_current(next));
        assert_eq!(poll.base.borrow().as_str(), "http://b");
    }

    #[test]
    fn teardown_invalidates_all_epochs() {
        let poll = PollState::new();
        let epoch = poll.retarget("http://a");
        poll.invalidate();
        assert!(!poll.is_current(epoch));
    }
}
