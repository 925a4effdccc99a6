//! Static file serving for the survey front end

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Serve the built front end from `dir`.
///
/// For SPA routing, any path that doesn't match a real file returns
/// `index.html` so client-side routes like `/run/1` or `/edit/1` resolve.
pub fn spa_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}
