pub mod allocation_bar;
pub mod header;
pub mod status_bar;
