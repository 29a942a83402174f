//! CraftyLink: a TTL cache-aside backend in front of the YouTube, Naver,
//! Kakao, Google Custom Search and Pexels APIs.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod state;
