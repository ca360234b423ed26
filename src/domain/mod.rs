// Domain layer - Dashboard documents and pure edits on them
pub mod dashboard;
pub mod editor;
pub mod event;
