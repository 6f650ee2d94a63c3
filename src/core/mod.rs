pub mod crop;
pub mod media;
pub mod opener;
pub mod preview_urls;
