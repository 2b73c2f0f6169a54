// Conditional logging shim: `tracing` macros are pulled in at the crate root when
// the feature is enabled; otherwise trace events compile away

#[cfg(not(feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}
