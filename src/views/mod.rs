// Vistas de la aplicación

pub mod app;
pub mod booking;
pub mod company;
pub mod entry;
pub mod history;
pub mod login;
pub mod rug;
pub mod washers;

pub use app::render_app;
