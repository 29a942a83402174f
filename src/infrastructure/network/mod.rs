pub mod google;
pub mod http;
pub mod kakao;
pub mod naver;
pub mod pexels;
pub mod youtube;

pub use google::GoogleImageClient;
pub use kakao::KakaoClient;
pub use naver::NaverClient;
pub use pexels::PexelsClient;
pub use youtube::YouTubeClient;
