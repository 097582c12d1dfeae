//! Offset paging primitives shared by list endpoints.
//!
//! The crate keeps paging arithmetic and cursor encoding out of HTTP
//! handlers. A [`PageRequest`] describes a zero-based window over a result
//! ordered by the caller, and a [`Cursor`] is the compact, URL-safe form of
//! the offset where the next window starts.
//!
//! ```
//! use pagination::{Cursor, PageRequest};
//!
//! let page = PageRequest::new(-5, 20);
//! assert_eq!(page.offset(), 0);
//!
//! let next = page.next_after(20).expect("full page has a successor");
//! assert_eq!(Cursor::from(next).to_string(), "k");
//! ```

pub mod base36;
mod cursor;
mod page;

pub use cursor::{Cursor, CursorError};
pub use page::{DEFAULT_PAGE_SIZE, PageRequest};
