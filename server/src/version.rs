pub(crate) const VERSION: &str = match option_env!("GIT_SHA") {
    Some(sha) => sha,
    None => env!("CARGO_PKG_VERSION"),
};
