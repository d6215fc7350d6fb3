pub mod help_modal;
pub mod status_bar;
pub mod toast;
