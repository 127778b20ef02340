pub mod components;
pub mod layout;
pub mod notice;
pub mod reveal;
pub mod search_box;
pub mod tabs;
pub mod theme;
