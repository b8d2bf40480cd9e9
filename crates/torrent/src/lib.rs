//! YTS API client wrapper
//!
//! This crate provides a simplified interface to the YTS movie index:
//! searching movies, fetching movie details, building magnet and
//! streaming links, and downloading `.torrent` files to a temp directory.

pub mod client;
pub mod constants;
pub mod download;
pub mod error;
pub mod links;
pub mod model;
pub mod utils;

pub use client::YtsApi;
pub use download::{DownloadedFile, Downloader};
pub use error::{ApiError, DownloadError};
pub use links::{magnet_link, streaming_link};
pub use model::{MediaType, MovieDetails, SearchResult, StreamLink};
