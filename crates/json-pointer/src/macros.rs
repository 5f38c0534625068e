/// Builds a [`JsonPointer`](crate::JsonPointer) from a literal, panicking if
/// the literal is not a valid pointer.
#[macro_export]
macro_rules! json_pointer {
    ($path:expr) => {
        <$crate::JsonPointer as ::std::str::FromStr>::from_str($path).expect("valid json pointer")
    };
}
