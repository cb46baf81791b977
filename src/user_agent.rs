//! User-Agent string sent with every camera request.

/// Default User-Agent for camera requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("camsnap/{version} (snapshot-archiver)")
}
