//! Outbound service clients used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! The remote marketplace API owns all business logic (users, OTP lifecycle,
//! franchise records, search ranking, image storage). Service modules wrap it
//! so route handlers stay focused on extraction and relay plumbing.

pub mod api;
