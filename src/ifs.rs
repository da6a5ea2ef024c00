pub mod wl_seat;
pub mod wl_surface;
