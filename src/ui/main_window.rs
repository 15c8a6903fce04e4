use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;

use crate::api::models::Role;

pub fn show_main_window(app: &Application) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("MeshComm")
        .default_width(720)
        .default_height(640)
        .build();

    let state = crate::app::AppState::load();

    let header = adw::HeaderBar::new();
    let title = gtk::Label::new(Some("MeshComm"));
    header.set_title_widget(Some(&title));

    // pack_end places the first-packed widget rightmost, so this reads
    // "Role: [dropdown] API: [entry]" left to right.
    let api_entry = gtk::Entry::new();
    api_entry.set_placeholder_text(Some("API base URL"));
    api_entry.set_width_chars(28);
    api_entry.set_text(&state.api_base);
    header.pack_end(&api_entry);
    header.pack_end(&gtk::Label::new(Some("API:")));

    let role_labels: Vec<&str> = Role::ALL.iter().map(|r| r.label()).collect();
    let role_dropdown = gtk::DropDown::from_strings(&role_labels);
    let selected = Role::ALL.iter().position(|r| *r == state.role).unwrap_or(0);
    role_dropdown.set_selected(selected as u32);
    header.pack_end(&role_dropdown);
    header.pack_end(&gtk::Label::new(Some("Role:")));

    let board = crate::ui::board_view::BoardView::new();
    board.set_role(state.role);
    board.set_base(&state.api_base);

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    container.append(&header);
    container.append(&board.widget());
    window.set_content(Some(&container));

    {
        let board = board.clone();
        role_dropdown.connect_selected_notify(move |dd| {
            let role = Role::ALL
                .get(dd.selected() as usize)
                .copied()
                .unwrap_or_default();
            board.set_role(role);
            let mut st = crate::app::AppState::load();
            st.role = role;
            if let Err(e) = st.save() {
                log::warn!("failed to save settings: {e}");
            }
        });
    }
    {
        // Every edit retargets the poller; reads still in flight against
        // the old base are discarded when they resolve.
        let board = board.clone();
        api_entry.connect_changed(move |entry| {
            board.set_base(&entry.text());
        });
    }
    {
        // Enter commits the edit: normalize and persist.
        api_entry.connect_activate(move |entry| {
            let base = crate::utils::normalize_url(&entry.text());
            entry.set_text(&base);
            let mut st = crate::app::AppState::load();
            st.api_base = base;
            if let Err(e) = st.save() {
                log::warn!("failed to save settings: {e}");
            }
        });
    }

    window.present();
}
