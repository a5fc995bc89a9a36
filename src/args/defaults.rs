pub(crate) const DEFAULT_USER_AGENT: &str = concat!("apibench/", env!("CARGO_PKG_VERSION"));
