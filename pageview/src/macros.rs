/// Forwards to `tracing::<level>!` under the `pageview` target; expands to nothing without the
/// `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! plog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "pageview", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! plog {
    ($level:ident, $($tt:tt)*) => {};
}
