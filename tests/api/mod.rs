//! REST API endpoint tests

mod health_tests;
mod member_tests;
mod room_tests;
