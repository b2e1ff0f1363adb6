pub mod primary_button;
