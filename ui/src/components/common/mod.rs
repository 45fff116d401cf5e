//! Common/Shared UI Components
//!
//! Reusable components used by every screen.

mod feedback;
mod fields;
mod icons;

pub use feedback::{ConfirmModal, EmptyState, ErrorBanner, Modal, NoticeBanner, Spinner, StatusBadge};
pub use fields::{CheckboxField, TextField, INPUT_CLASS};
pub use icons::*;
