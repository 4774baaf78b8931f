//! Markdown rendering of change logs

pub mod changelog_render;

pub use changelog_render::render_change_log;
