// Services: SOLO comunicación con el backend + workflows

pub mod api_client;
pub mod auth_service;
pub mod booking_service;
pub mod records_service;
pub mod summary_service;

pub use api_client::{ApiClient, ApiError, ApiResult};
pub use booking_service::{build_wash_record, create_booking, BookingOutcome};
