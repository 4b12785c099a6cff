pub mod ui;

mod actions;
mod backend_provider;
mod component;
mod dialog;
mod error_handler;
mod list;
mod prompt;
mod status_label;
mod video_form;
mod video_view;
