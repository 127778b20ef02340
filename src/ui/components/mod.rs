pub mod card_list;
pub mod header;
pub mod progress_bar;
pub mod progress_panel;
pub mod search_popup;
