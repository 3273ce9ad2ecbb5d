//! HTTP front end for the tinylink shortener.
//!
//! | Method | Path                       | Response                         |
//! |--------|----------------------------|----------------------------------|
//! | POST   | `/` (form field `link`)    | the short code, as plain text    |
//! | GET    | `/{short_code}`            | `303 See Other` to the stored URL |
//! | GET    | `/getFullURL/{short_code}` | the stored URL, as plain text    |
//! | GET    | `/health`                  | status and version, as JSON      |

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
