pub mod broadcast_tests;
pub mod connection_tests;
