//! Presentation controllers for registration and the pending-request review
//! page, with the host collaborators they need expressed as traits.

pub mod alerts;
pub mod confirm;
pub mod form;
pub mod i18n;
pub mod navigation;
pub mod pending;
pub mod submitter;
