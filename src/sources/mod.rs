pub mod ahrefs;
pub mod cloudflare;
pub mod http;
pub mod tranco;
