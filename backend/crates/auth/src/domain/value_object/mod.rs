//! Value Object Module

pub mod email;
pub mod otp_code;
pub mod phone;
pub mod session_id;
