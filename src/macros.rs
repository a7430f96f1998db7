//! The [`edn!`] macro for building native values inline.

/// Builds an [`crate::Edn`] value from edn-flavored syntax.
///
/// Supported shapes: `nil`, `true`, `false`, `[ ... ]` vectors,
/// `#{ ... }` sets, `{ key => value, ... }` maps (keys are arbitrary
/// values, hence the arrow), and any expression convertible with
/// [`crate::Edn::from`]. Elements are comma-separated.
///
/// A set literal must be the whole macro input: Rust tokenizes `#` apart
/// from the braces, so `#{...}` cannot sit in a nested element position.
/// Build nested sets with [`crate::Edn::set`].
///
/// # Examples
///
/// ```rust
/// use edn_codec::{edn, Edn};
///
/// let value = edn!({
///     "name" => "Alice",
///     "scores" => [1, 2, 3],
///     "manager" => nil,
/// });
/// assert_eq!(value.get(&Edn::from("manager")), Some(&Edn::Nil));
///
/// let groups = edn!(#{"admin", "user", "admin"});
/// assert_eq!(groups, Edn::set(vec![Edn::from("admin"), Edn::from("user")]));
/// ```
#[macro_export]
macro_rules! edn {
    (nil) => {
        $crate::Edn::Nil
    };

    (true) => {
        $crate::Edn::Bool(true)
    };

    (false) => {
        $crate::Edn::Bool(false)
    };

    ([]) => {
        $crate::Edn::Vector(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Edn::Vector(vec![$($crate::edn!($elem)),*])
    };

    (#{}) => {
        $crate::Edn::Set(vec![])
    };

    (#{ $($elem:tt),* $(,)? }) => {
        $crate::Edn::set(vec![$($crate::edn!($elem)),*])
    };

    ({}) => {
        $crate::Edn::Map(vec![])
    };

    ({ $($key:tt => $value:tt),* $(,)? }) => {
        $crate::Edn::map(vec![$(($crate::edn!($key), $crate::edn!($value))),*])
    };

    // Fallback for any expression with a From conversion.
    ($other:expr) => {
        $crate::Edn::from($other)
    };
}
