pub mod rate_floor;
pub mod scenario;
pub mod support;
pub mod unmapped;
