//! Generic records table: filtering, sorting, debounced search, fetch
//! sequencing and the render model shared by every listing page.

pub mod controller;
pub mod debounce;
pub mod filter;
pub mod live;
pub mod record;
pub mod sort;
pub mod view;
